// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use teller::application::AccountSession;
use teller::domain::{AccountState, Action, apply};

/// Helper to build an open account with the given balance and loan
pub fn open_account(balance: i64, loan: i64) -> AccountState {
    AccountState {
        balance,
        loan,
        is_active: true,
        ..AccountState::rest()
    }
}

/// Apply a sequence of actions starting from `state`
pub fn apply_all(state: AccountState, actions: &[Action]) -> AccountState {
    actions.iter().fold(state, |s, a| apply(&s, a))
}

/// Test fixture: sessions in well-known situations
pub struct Sessions;

impl Sessions {
    /// Freshly opened account with the opening balance
    pub fn opened() -> AccountSession {
        let mut session = AccountSession::new();
        session.dispatch(Action::OpenAccount);
        session
    }

    /// Opened account holding a 5000 loan (balance 5500)
    pub fn with_loan() -> AccountSession {
        let mut session = Self::opened();
        session.dispatch_all([Action::SetRequestLoanInput(5000), Action::RequestLoan]);
        session
    }
}
