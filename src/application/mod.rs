// Application layer - drives the account machine on behalf of a client
// (CLI shell, script runner, or any other presentation).

pub mod error;
pub mod script;
pub mod session;

pub use error::*;
pub use script::{Command, parse_line, parse_script};
pub use session::*;
