mod account;
mod action;
mod money;
mod reducer;

#[cfg(test)]
mod proptests;

pub use account::*;
pub use action::*;
pub use money::*;
pub use reducer::*;
