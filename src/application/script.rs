//! Line-oriented command language shared by the shell and script runner.
//!
//! ```text
//! # comments and blank lines are ignored
//! open
//! deposit 150          # type 150 into the deposit field, then press Deposit
//! set withdraw 100     # only stage the amount
//! withdraw             # press Withdraw with whatever is staged
//! status
//! ```

use crate::domain::{Action, ActionKind, Amount, parse_amount};
use crate::io::ExportFormat;

use super::AppError;

/// One parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Actions to dispatch, in order
    Actions(Vec<Action>),
    /// Render the current state
    Status,
    /// Print a snapshot of the current state
    Export(ExportFormat),
    Help,
    Quit,
}

impl Command {
    pub fn actions(&self) -> &[Action] {
        match self {
            Command::Actions(actions) => actions,
            _ => &[],
        }
    }
}

pub const HELP: &str = "\
Commands:
  open                      open the account (balance starts at 500)
  deposit [AMOUNT]          deposit the staged amount, or stage AMOUNT first
  withdraw [AMOUNT]         withdraw the staged amount, or stage AMOUNT first
  request-loan [AMOUNT]     request a loan of the staged amount
  pay-loan [AMOUNT]         pay back the staged amount
  close                     close the account (needs zero balance and no loan)
  set FIELD AMOUNT          stage AMOUNT in deposit, withdraw, request-loan or pay-loan
  status                    show balance and loan
  export [text|json|csv]    print a snapshot (text unless a format is given)
  help                      show this help
  quit                      leave the shell";

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, AppError> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let words: Vec<&str> = content.split_whitespace().collect();
    let Some((verb, args)) = words.split_first() else {
        return Ok(None);
    };
    let verb = verb.to_lowercase();

    let command = match verb.as_str() {
        "status" | "balance" => {
            expect_no_args(&verb, args)?;
            Command::Status
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => {
            expect_no_args(&verb, args)?;
            Command::Quit
        }
        "export" => match args {
            [] => Command::Export(ExportFormat::default()),
            [format] => Command::Export(
                ExportFormat::from_str(format)
                    .ok_or_else(|| AppError::InvalidFormat(format.to_string()))?,
            ),
            _ => {
                return Err(AppError::WrongArguments {
                    command: verb.clone(),
                    expected: "at most one format",
                });
            }
        },
        "set" => match args {
            [field, amount] => {
                let amount = parse_amount(amount)?;
                Command::Actions(vec![setter_for_field(field, amount)?])
            }
            _ => {
                return Err(AppError::WrongArguments {
                    command: verb.clone(),
                    expected: "a field and an amount",
                });
            }
        },
        _ => {
            let kind = ActionKind::from_str(&verb)
                .ok_or_else(|| AppError::UnknownCommand(verb.clone()))?;
            Command::Actions(actions_for(kind, &verb, args)?)
        }
    };

    Ok(Some(command))
}

/// Parse a whole script, keeping the 1-based line number of each command.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>, AppError> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let parsed = parse_line(line).map_err(|e| AppError::Script {
            line: line_no,
            source: Box::new(e),
        })?;
        if let Some(command) = parsed {
            commands.push((line_no, command));
        }
    }
    Ok(commands)
}

fn actions_for(kind: ActionKind, verb: &str, args: &[&str]) -> Result<Vec<Action>, AppError> {
    if kind.is_setter() {
        let [amount] = args else {
            return Err(AppError::WrongArguments {
                command: verb.to_string(),
                expected: "an amount",
            });
        };
        let amount = parse_amount(amount)?;
        return Ok(vec![Action::from_tag(kind.as_str(), Some(amount))]);
    }

    let action = Action::from_tag(kind.as_str(), None);
    match args {
        [] => Ok(vec![action]),
        [amount] => {
            let amount = parse_amount(amount)?;
            match staging_setter(kind, amount) {
                Some(setter) => Ok(vec![setter, action]),
                None => Err(AppError::WrongArguments {
                    command: verb.to_string(),
                    expected: "no arguments",
                }),
            }
        }
        _ => Err(AppError::WrongArguments {
            command: verb.to_string(),
            expected: "at most one amount",
        }),
    }
}

/// The setter that stages the amount an action consumes
fn staging_setter(kind: ActionKind, amount: Amount) -> Option<Action> {
    match kind {
        ActionKind::Deposit => Some(Action::SetDepositInput(amount)),
        ActionKind::Withdraw => Some(Action::SetWithdrawInput(amount)),
        ActionKind::RequestLoan => Some(Action::SetRequestLoanInput(amount)),
        ActionKind::PayLoan => Some(Action::SetPayLoanInput(amount)),
        _ => None,
    }
}

fn setter_for_field(field: &str, amount: Amount) -> Result<Action, AppError> {
    let normalized: String = field
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        "deposit" => Ok(Action::SetDepositInput(amount)),
        "withdraw" => Ok(Action::SetWithdrawInput(amount)),
        "requestloan" | "loan" => Ok(Action::SetRequestLoanInput(amount)),
        "payloan" | "payment" => Ok(Action::SetPayLoanInput(amount)),
        _ => Err(AppError::UnknownField(field.to_string())),
    }
}

fn expect_no_args(verb: &str, args: &[&str]) -> Result<(), AppError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(AppError::WrongArguments {
            command: verb.to_string(),
            expected: "no arguments",
        })
    }
}
