use thiserror::Error;

use crate::domain::{Control, ParseAmountError};

/// Errors raised while turning user input into actions. The account machine
/// itself never fails; everything here is caught before it is reached.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown input field: {0} (expected deposit, withdraw, request-loan or pay-loan)")]
    UnknownField(String),

    #[error("'{command}' expects {expected}")]
    WrongArguments {
        command: String,
        expected: &'static str,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("Invalid export format: {0} (expected text, json or csv)")]
    InvalidFormat(String),

    #[error("{0} is disabled until the account is open")]
    ControlDisabled(Control),

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<AppError>,
    },
}
