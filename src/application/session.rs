use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{AccountState, AccountView, Action, ActionKind, apply};

use super::AppError;

pub type SessionId = Uuid;

/// Owner of the one account state for a driving loop (a shell, a script run,
/// a UI). Each action is processed to completion before the next one is
/// accepted, and the state is replaced wholesale on every dispatch.
pub struct AccountSession {
    id: SessionId,
    started_at: DateTime<Utc>,
    state: AccountState,
    dispatch_count: u64,
    noop_count: u64,
}

/// Result of dispatching one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub kind: ActionKind,
    pub before: AccountState,
    pub after: AccountState,
}

impl Dispatched {
    /// Returns true if the action had any effect on the state
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Why an action left the state untouched, if it did.
    ///
    /// Setters have no precondition: storing the value already staged is
    /// not a refused request, so they never report a reason.
    pub fn noop_reason(&self) -> Option<NoopReason> {
        if self.changed() || self.kind.is_setter() {
            return None;
        }
        Some(match self.kind {
            ActionKind::Unrecognized => NoopReason::Unrecognized,
            ActionKind::Deposit
            | ActionKind::Withdraw
            | ActionKind::RequestLoan
            | ActionKind::PayLoan
            | ActionKind::CloseAccount
                if !self.before.is_active =>
            {
                NoopReason::Inactive
            }
            _ => NoopReason::Precondition,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    /// The account is not open
    Inactive,
    /// The machine does not know the action
    Unrecognized,
    /// The action was allowed but its own condition failed
    Precondition,
}

impl NoopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoopReason::Inactive => "account is not open",
            NoopReason::Unrecognized => "unrecognized action",
            NoopReason::Precondition => "conditions not met",
        }
    }
}

impl std::fmt::Display for NoopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AccountSession {
    /// Start a session with the account at rest.
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: AccountState::rest(),
            dispatch_count: 0,
            noop_count: 0,
        };
        info!(session = %session.id, "account session started");
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn view(&self) -> AccountView {
        self.state.view()
    }

    /// Number of actions dispatched so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// Number of dispatched actions that left the state unchanged
    pub fn noop_count(&self) -> u64 {
        self.noop_count
    }

    /// Apply one action and replace the state with the result.
    pub fn dispatch(&mut self, action: Action) -> Dispatched {
        let before = self.state;
        let after = apply(&before, &action);
        self.state = after;
        self.dispatch_count += 1;

        let outcome = Dispatched {
            kind: action.kind(),
            before,
            after,
        };

        match outcome.noop_reason() {
            None => debug!(
                session = %self.id,
                action = %outcome.kind,
                balance = after.balance,
                loan = after.loan,
                active = after.is_active,
                "action applied"
            ),
            Some(reason) => {
                self.noop_count += 1;
                debug!(
                    session = %self.id,
                    action = %outcome.kind,
                    reason = %reason,
                    "action had no effect"
                );
            }
        }

        outcome
    }

    /// Dispatch actions in order, one at a time.
    pub fn dispatch_all<I>(&mut self, actions: I) -> Vec<Dispatched>
    where
        I: IntoIterator<Item = Action>,
    {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .collect()
    }

    /// Dispatch a command's actions through the screen controls that issue
    /// them. Controls other than "open" are disabled while the account is
    /// closed; if any control is disabled nothing is dispatched.
    pub fn press(&mut self, actions: Vec<Action>) -> Result<Vec<Dispatched>, AppError> {
        let view = self.view();
        if let Some(control) = actions
            .iter()
            .filter_map(Action::control)
            .find(|control| !view.is_enabled(*control))
        {
            debug!(session = %self.id, control = %control, "control is disabled");
            return Err(AppError::ControlDisabled(control));
        }
        Ok(self.dispatch_all(actions))
    }

    /// Discard the account and return to the rest state.
    pub fn reset(&mut self) {
        info!(session = %self.id, dispatched = self.dispatch_count, "account session reset");
        self.state = AccountState::rest();
        self.dispatch_count = 0;
        self.noop_count = 0;
    }
}

impl Default for AccountSession {
    fn default() -> Self {
        Self::new()
    }
}
