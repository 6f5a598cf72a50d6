use super::{Amount, Control};

/// Everything the account machine can be asked to do.
///
/// The four amount-driven actions take their amount from the matching
/// pending input, never from the action itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    OpenAccount,
    Deposit,
    Withdraw,
    RequestLoan,
    PayLoan,
    CloseAccount,
    SetDepositInput(Amount),
    SetWithdrawInput(Amount),
    SetRequestLoanInput(Amount),
    SetPayLoanInput(Amount),
    /// A tag the machine does not know. Applying it changes nothing.
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    OpenAccount,
    Deposit,
    Withdraw,
    RequestLoan,
    PayLoan,
    CloseAccount,
    SetDepositInput,
    SetWithdrawInput,
    SetRequestLoanInput,
    SetPayLoanInput,
    Unrecognized,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::OpenAccount => "open-account",
            ActionKind::Deposit => "deposit",
            ActionKind::Withdraw => "withdraw",
            ActionKind::RequestLoan => "request-loan",
            ActionKind::PayLoan => "pay-loan",
            ActionKind::CloseAccount => "close-account",
            ActionKind::SetDepositInput => "set-deposit-input",
            ActionKind::SetWithdrawInput => "set-withdraw-input",
            ActionKind::SetRequestLoanInput => "set-request-loan-input",
            ActionKind::SetPayLoanInput => "set-pay-loan-input",
            ActionKind::Unrecognized => "unrecognized",
        }
    }

    /// Parse a tag in kebab-case, snake_case or camelCase, ignoring case.
    /// Short aliases ("open", "close", "deposit-input", ...) are accepted too.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "open" | "openaccount" => Some(ActionKind::OpenAccount),
            "deposit" => Some(ActionKind::Deposit),
            "withdraw" => Some(ActionKind::Withdraw),
            "requestloan" => Some(ActionKind::RequestLoan),
            "payloan" => Some(ActionKind::PayLoan),
            "close" | "closeaccount" => Some(ActionKind::CloseAccount),
            "depositinput" | "setdepositinput" => Some(ActionKind::SetDepositInput),
            "withdrawinput" | "setwithdrawinput" => Some(ActionKind::SetWithdrawInput),
            "requestloaninput" | "setrequestloaninput" => Some(ActionKind::SetRequestLoanInput),
            "payloaninput" | "setpayloaninput" => Some(ActionKind::SetPayLoanInput),
            _ => None,
        }
    }

    pub fn is_setter(&self) -> bool {
        matches!(
            self,
            ActionKind::SetDepositInput
                | ActionKind::SetWithdrawInput
                | ActionKind::SetRequestLoanInput
                | ActionKind::SetPayLoanInput
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Action {
    /// Build an action from a tag and an optional payload. Never fails:
    /// unknown tags become [`Action::Unrecognized`], a setter without a
    /// payload stores zero, and payloads on other actions are dropped.
    pub fn from_tag(tag: &str, payload: Option<Amount>) -> Self {
        let amount = payload.unwrap_or(0);

        match ActionKind::from_str(tag) {
            Some(ActionKind::OpenAccount) => Action::OpenAccount,
            Some(ActionKind::Deposit) => Action::Deposit,
            Some(ActionKind::Withdraw) => Action::Withdraw,
            Some(ActionKind::RequestLoan) => Action::RequestLoan,
            Some(ActionKind::PayLoan) => Action::PayLoan,
            Some(ActionKind::CloseAccount) => Action::CloseAccount,
            Some(ActionKind::SetDepositInput) => Action::SetDepositInput(amount),
            Some(ActionKind::SetWithdrawInput) => Action::SetWithdrawInput(amount),
            Some(ActionKind::SetRequestLoanInput) => Action::SetRequestLoanInput(amount),
            Some(ActionKind::SetPayLoanInput) => Action::SetPayLoanInput(amount),
            // "unrecognized" is not a tag, so this only happens for unknown input
            Some(ActionKind::Unrecognized) | None => Action::Unrecognized(tag.to_string()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::OpenAccount => ActionKind::OpenAccount,
            Action::Deposit => ActionKind::Deposit,
            Action::Withdraw => ActionKind::Withdraw,
            Action::RequestLoan => ActionKind::RequestLoan,
            Action::PayLoan => ActionKind::PayLoan,
            Action::CloseAccount => ActionKind::CloseAccount,
            Action::SetDepositInput(_) => ActionKind::SetDepositInput,
            Action::SetWithdrawInput(_) => ActionKind::SetWithdrawInput,
            Action::SetRequestLoanInput(_) => ActionKind::SetRequestLoanInput,
            Action::SetPayLoanInput(_) => ActionKind::SetPayLoanInput,
            Action::Unrecognized(_) => ActionKind::Unrecognized,
        }
    }

    /// The screen control that issues this action, if any.
    pub fn control(&self) -> Option<Control> {
        match self {
            Action::OpenAccount => Some(Control::OpenAccount),
            Action::Deposit => Some(Control::Deposit),
            Action::Withdraw => Some(Control::Withdraw),
            Action::RequestLoan => Some(Control::RequestLoan),
            Action::PayLoan => Some(Control::PayLoan),
            Action::CloseAccount => Some(Control::CloseAccount),
            Action::SetDepositInput(_) => Some(Control::DepositInput),
            Action::SetWithdrawInput(_) => Some(Control::WithdrawInput),
            Action::SetRequestLoanInput(_) => Some(Control::RequestLoanInput),
            Action::SetPayLoanInput(_) => Some(Control::PayLoanInput),
            Action::Unrecognized(_) => None,
        }
    }

    /// Returns true if this action only takes effect on an open account.
    pub fn requires_active(&self) -> bool {
        matches!(
            self,
            Action::Deposit
                | Action::Withdraw
                | Action::RequestLoan
                | Action::PayLoan
                | Action::CloseAccount
        )
    }
}
