pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod logging;

pub use application::AccountSession;
pub use domain::*;
