//! The account state machine.
//!
//! [`apply`] is the only place where account state changes. It is pure and
//! total: every input state and action yields a fully populated new state,
//! and a request whose preconditions fail yields the input state unchanged.

use super::{Action, AccountState, OPENING_BALANCE};

/// A pure `(State, Action) -> State` transition function.
pub trait Reducer {
    type State;
    type Action;

    fn reduce(state: &Self::State, action: &Self::Action) -> Self::State;
}

/// The single-account machine: active vs. inactive, with per-field
/// conditional updates inside the active state.
pub struct AccountStateMachine;

impl Reducer for AccountStateMachine {
    type State = AccountState;
    type Action = Action;

    fn reduce(state: &AccountState, action: &Action) -> AccountState {
        apply(state, action)
    }
}

/// Apply one action to the account.
pub fn apply(state: &AccountState, action: &Action) -> AccountState {
    if action.requires_active() && !state.is_active {
        return *state;
    }

    match action {
        Action::OpenAccount => AccountState {
            balance: OPENING_BALANCE,
            is_active: true,
            ..*state
        },

        Action::Deposit => AccountState {
            balance: state.balance.saturating_add(state.deposit_amount),
            ..*state
        },

        Action::Withdraw => {
            // Withdrawing the whole balance counts as insufficient funds
            if state.balance <= state.withdraw_amount {
                return *state;
            }
            AccountState {
                balance: if state.balance > 0 {
                    state.balance.saturating_sub(state.withdraw_amount)
                } else {
                    state.balance
                },
                ..*state
            }
        }

        Action::RequestLoan => {
            if state.has_loan() {
                return *state;
            }
            AccountState {
                balance: state.balance.saturating_add(state.requested_loan_amount),
                loan: state.requested_loan_amount,
                ..*state
            }
        }

        Action::PayLoan => {
            if state.balance <= state.loan || state.loan == 0 {
                return *state;
            }
            // Both fields are judged against the loan as it was before payment
            let covered = state.balance >= state.loan;
            AccountState {
                loan: if covered {
                    state.loan.saturating_sub(state.loan_payment_amount)
                } else {
                    state.loan
                },
                balance: if covered {
                    state.balance.saturating_sub(state.loan_payment_amount)
                } else {
                    state.balance
                },
                ..*state
            }
        }

        Action::CloseAccount => {
            if state.balance == 0 && state.loan == 0 {
                AccountState::rest()
            } else {
                *state
            }
        }

        Action::SetDepositInput(amount) => AccountState {
            deposit_amount: *amount,
            ..*state
        },
        Action::SetWithdrawInput(amount) => AccountState {
            withdraw_amount: *amount,
            ..*state
        },
        Action::SetRequestLoanInput(amount) => AccountState {
            requested_loan_amount: *amount,
            ..*state
        },
        Action::SetPayLoanInput(amount) => AccountState {
            loan_payment_amount: *amount,
            ..*state
        },

        Action::Unrecognized(_) => *state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(balance: i64) -> AccountState {
        AccountState {
            balance,
            is_active: true,
            ..AccountState::rest()
        }
    }

    #[test]
    fn test_open_from_rest() {
        let state = apply(&AccountState::rest(), &Action::OpenAccount);
        assert_eq!(state.balance, 500);
        assert_eq!(state.loan, 0);
        assert!(state.is_active);
    }

    #[test]
    fn test_open_keeps_pending_inputs() {
        let staged = AccountState {
            deposit_amount: 150,
            ..AccountState::rest()
        };
        let state = apply(&staged, &Action::OpenAccount);
        assert_eq!(state.balance, 500);
        assert_eq!(state.deposit_amount, 150);
    }

    #[test]
    fn test_reopen_resets_balance_but_keeps_loan() {
        let state = AccountState {
            balance: 5500,
            loan: 5000,
            is_active: true,
            ..AccountState::rest()
        };
        let reopened = apply(&state, &Action::OpenAccount);
        assert_eq!(reopened.balance, 500);
        assert_eq!(reopened.loan, 5000);
        assert!(reopened.is_active);
    }

    #[test]
    fn test_deposit() {
        let state = AccountState {
            deposit_amount: 150,
            ..open_with(500)
        };
        assert_eq!(apply(&state, &Action::Deposit).balance, 650);
    }

    #[test]
    fn test_deposit_saturates() {
        let state = AccountState {
            deposit_amount: i64::MAX,
            ..open_with(500)
        };
        assert_eq!(apply(&state, &Action::Deposit).balance, i64::MAX);
    }

    #[test]
    fn test_withdraw_requires_strictly_more_than_amount() {
        let exact = AccountState {
            withdraw_amount: 500,
            ..open_with(500)
        };
        assert_eq!(apply(&exact, &Action::Withdraw), exact);

        let over = AccountState {
            withdraw_amount: 501,
            ..open_with(500)
        };
        assert_eq!(apply(&over, &Action::Withdraw), over);

        let under = AccountState {
            withdraw_amount: 499,
            ..open_with(500)
        };
        assert_eq!(apply(&under, &Action::Withdraw).balance, 1);
    }

    #[test]
    fn test_withdraw_from_negative_balance_is_noop() {
        let state = AccountState {
            withdraw_amount: -100,
            ..open_with(-50)
        };
        assert_eq!(apply(&state, &Action::Withdraw), state);
    }

    #[test]
    fn test_request_loan() {
        let state = AccountState {
            requested_loan_amount: 5000,
            ..open_with(500)
        };
        let after = apply(&state, &Action::RequestLoan);
        assert_eq!(after.balance, 5500);
        assert_eq!(after.loan, 5000);

        // Only one loan at a time
        assert_eq!(apply(&after, &Action::RequestLoan), after);
    }

    #[test]
    fn test_request_zero_loan_adds_nothing() {
        let state = open_with(500);
        let after = apply(&state, &Action::RequestLoan);
        assert_eq!(after, state);
        assert!(!after.has_loan());
    }

    #[test]
    fn test_pay_loan() {
        let state = AccountState {
            balance: 5500,
            loan: 5000,
            loan_payment_amount: 5000,
            ..open_with(5500)
        };
        let after = apply(&state, &Action::PayLoan);
        assert_eq!(after.balance, 500);
        assert_eq!(after.loan, 0);
    }

    #[test]
    fn test_partial_loan_payment() {
        let state = AccountState {
            loan: 5000,
            loan_payment_amount: 1000,
            ..open_with(5500)
        };
        let after = apply(&state, &Action::PayLoan);
        assert_eq!(after.balance, 4500);
        assert_eq!(after.loan, 4000);
    }

    #[test]
    fn test_overpayment_can_drive_balance_negative() {
        let state = AccountState {
            loan: 100,
            loan_payment_amount: 1000,
            ..open_with(500)
        };
        let after = apply(&state, &Action::PayLoan);
        assert_eq!(after.balance, -500);
        assert_eq!(after.loan, -900);
    }

    #[test]
    fn test_pay_loan_needs_balance_above_loan() {
        let state = AccountState {
            loan: 5000,
            loan_payment_amount: 5000,
            ..open_with(5000)
        };
        assert_eq!(apply(&state, &Action::PayLoan), state);
    }

    #[test]
    fn test_pay_loan_without_loan_is_noop() {
        let state = AccountState {
            loan_payment_amount: 100,
            ..open_with(500)
        };
        assert_eq!(apply(&state, &Action::PayLoan), state);
    }

    #[test]
    fn test_close_requires_empty_account() {
        let funded = open_with(500);
        assert_eq!(apply(&funded, &Action::CloseAccount), funded);

        let indebted = AccountState {
            loan: 10,
            ..open_with(0)
        };
        assert_eq!(apply(&indebted, &Action::CloseAccount), indebted);
    }

    #[test]
    fn test_close_clears_pending_inputs() {
        let state = AccountState {
            deposit_amount: 1,
            withdraw_amount: 2,
            requested_loan_amount: 3,
            loan_payment_amount: 4,
            ..open_with(0)
        };
        assert_eq!(apply(&state, &Action::CloseAccount), AccountState::rest());
    }

    #[test]
    fn test_setters_work_while_inactive() {
        let state = AccountState::rest();
        let state = apply(&state, &Action::SetDepositInput(1));
        let state = apply(&state, &Action::SetWithdrawInput(2));
        let state = apply(&state, &Action::SetRequestLoanInput(3));
        let state = apply(&state, &Action::SetPayLoanInput(4));
        assert_eq!(state.deposit_amount, 1);
        assert_eq!(state.withdraw_amount, 2);
        assert_eq!(state.requested_loan_amount, 3);
        assert_eq!(state.loan_payment_amount, 4);
        assert!(!state.is_active);
        assert_eq!(state.balance, 0);
    }

    #[test]
    fn test_inactive_guard() {
        let state = AccountState {
            deposit_amount: 100,
            requested_loan_amount: 100,
            ..AccountState::rest()
        };
        for action in [
            Action::Deposit,
            Action::Withdraw,
            Action::RequestLoan,
            Action::PayLoan,
            Action::CloseAccount,
        ] {
            assert_eq!(apply(&state, &action), state, "{:?}", action);
        }
    }

    #[test]
    fn test_unrecognized_is_noop() {
        let state = AccountState {
            loan: 7,
            ..open_with(42)
        };
        assert_eq!(
            apply(&state, &Action::Unrecognized("transfer".into())),
            state
        );
    }

    #[test]
    fn test_reducer_trait_delegates() {
        let state = AccountStateMachine::reduce(&AccountState::rest(), &Action::OpenAccount);
        assert_eq!(state, apply(&AccountState::rest(), &Action::OpenAccount));
    }
}
