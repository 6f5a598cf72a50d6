use serde::{Deserialize, Serialize};

use super::Amount;

/// The whole account: funds, the outstanding loan and the pending inputs
/// staged by whoever drives the machine.
///
/// A state value is never mutated in place by a transition; every transition
/// produces a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    /// Current funds. Only a loan payment can push this below zero.
    pub balance: Amount,
    /// Outstanding loan, 0 when there is none
    pub loan: Amount,
    /// Whether the account has been opened
    pub is_active: bool,
    pub deposit_amount: Amount,
    pub withdraw_amount: Amount,
    pub requested_loan_amount: Amount,
    pub loan_payment_amount: Amount,
}

impl AccountState {
    /// The state before an account is opened and after it is closed.
    pub fn rest() -> Self {
        Self::default()
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::rest()
    }

    pub fn has_loan(&self) -> bool {
        self.loan != 0
    }

    /// True when a close request would succeed.
    pub fn can_close(&self) -> bool {
        self.is_active && self.balance == 0 && self.loan == 0
    }

    pub fn view(&self) -> AccountView {
        AccountView {
            balance: self.balance,
            loan: self.loan,
            is_active: self.is_active,
        }
    }
}

/// The part of the state a presentation layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub balance: Amount,
    pub loan: Amount,
    pub is_active: bool,
}

/// Controls offered by a presentation layer: one button per action and one
/// numeric field per pending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    OpenAccount,
    DepositInput,
    Deposit,
    WithdrawInput,
    Withdraw,
    RequestLoanInput,
    RequestLoan,
    PayLoanInput,
    PayLoan,
    CloseAccount,
}

impl Control {
    pub const ALL: [Control; 10] = [
        Control::OpenAccount,
        Control::DepositInput,
        Control::Deposit,
        Control::WithdrawInput,
        Control::Withdraw,
        Control::RequestLoanInput,
        Control::RequestLoan,
        Control::PayLoanInput,
        Control::PayLoan,
        Control::CloseAccount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Control::OpenAccount => "Open account",
            Control::DepositInput => "Deposit amount",
            Control::Deposit => "Deposit",
            Control::WithdrawInput => "Withdraw amount",
            Control::Withdraw => "Withdraw",
            Control::RequestLoanInput => "Loan amount",
            Control::RequestLoan => "Request a loan",
            Control::PayLoanInput => "Payment amount",
            Control::PayLoan => "Pay loan",
            Control::CloseAccount => "Close account",
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl AccountView {
    /// Opening is always available; everything else waits for an open account.
    pub fn is_enabled(&self, control: Control) -> bool {
        control == Control::OpenAccount || self.is_active
    }

    pub fn enabled_controls(&self) -> Vec<Control> {
        Control::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }
}
