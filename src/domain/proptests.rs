//! Property-based tests for the account machine
//!
//! These check the invariants that must hold for every state and action.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = Amount> {
    prop_oneof![
        4 => 0i64..10_000,
        1 => any::<i64>(),
    ]
}

fn arb_state() -> impl Strategy<Value = AccountState> {
    (
        arb_amount(),
        arb_amount(),
        any::<bool>(),
        arb_amount(),
        arb_amount(),
        arb_amount(),
        arb_amount(),
    )
        .prop_map(
            |(balance, loan, is_active, deposit, withdraw, request, payment)| AccountState {
                balance,
                loan,
                is_active,
                deposit_amount: deposit,
                withdraw_amount: withdraw,
                requested_loan_amount: request,
                loan_payment_amount: payment,
            },
        )
}

fn arb_inactive_state() -> impl Strategy<Value = AccountState> {
    arb_state().prop_map(|s| AccountState {
        is_active: false,
        ..s
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::OpenAccount),
        Just(Action::Deposit),
        Just(Action::Withdraw),
        Just(Action::RequestLoan),
        Just(Action::PayLoan),
        Just(Action::CloseAccount),
        arb_amount().prop_map(Action::SetDepositInput),
        arb_amount().prop_map(Action::SetWithdrawInput),
        arb_amount().prop_map(Action::SetRequestLoanInput),
        arb_amount().prop_map(Action::SetPayLoanInput),
        "[a-z]{1,12}".prop_map(Action::Unrecognized),
    ]
}

fn arb_guarded_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Deposit),
        Just(Action::Withdraw),
        Just(Action::RequestLoan),
        Just(Action::PayLoan),
        Just(Action::CloseAccount),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_unrecognized_action_is_identity(state in arb_state(), tag in "[a-z]{1,12}") {
        prop_assert_eq!(apply(&state, &Action::Unrecognized(tag)), state);
    }

    #[test]
    fn prop_inactive_guard(state in arb_inactive_state(), action in arb_guarded_action()) {
        prop_assert_eq!(apply(&state, &action), state);
    }

    #[test]
    fn prop_open_from_rest_ignores_pending_inputs(
        deposit in arb_amount(),
        withdraw in arb_amount(),
        request in arb_amount(),
        payment in arb_amount()
    ) {
        let staged = AccountState {
            deposit_amount: deposit,
            withdraw_amount: withdraw,
            requested_loan_amount: request,
            loan_payment_amount: payment,
            ..AccountState::rest()
        };
        let opened = apply(&staged, &Action::OpenAccount);
        prop_assert_eq!(opened.balance, OPENING_BALANCE);
        prop_assert_eq!(opened.loan, 0);
        prop_assert!(opened.is_active);
    }

    #[test]
    fn prop_close_is_idempotent(state in arb_state()) {
        let once = apply(&state, &Action::CloseAccount);
        if once != state {
            // The close went through
            prop_assert!(once.is_rest());
            prop_assert_eq!(apply(&once, &Action::CloseAccount), once);
        }
    }

    #[test]
    fn prop_setters_touch_only_their_field(state in arb_state(), amount in arb_amount()) {
        let after = apply(&state, &Action::SetDepositInput(amount));
        prop_assert_eq!(after, AccountState { deposit_amount: amount, ..state });

        let after = apply(&state, &Action::SetWithdrawInput(amount));
        prop_assert_eq!(after, AccountState { withdraw_amount: amount, ..state });

        let after = apply(&state, &Action::SetRequestLoanInput(amount));
        prop_assert_eq!(after, AccountState { requested_loan_amount: amount, ..state });

        let after = apply(&state, &Action::SetPayLoanInput(amount));
        prop_assert_eq!(after, AccountState { loan_payment_amount: amount, ..state });
    }

    #[test]
    fn prop_transitions_never_touch_pending_inputs(state in arb_state(), action in arb_guarded_action()) {
        let after = apply(&state, &action);
        if !after.is_rest() {
            prop_assert_eq!(after.deposit_amount, state.deposit_amount);
            prop_assert_eq!(after.withdraw_amount, state.withdraw_amount);
            prop_assert_eq!(after.requested_loan_amount, state.requested_loan_amount);
            prop_assert_eq!(after.loan_payment_amount, state.loan_payment_amount);
        }
    }

    #[test]
    fn prop_rest_state_invariant_holds_along_any_run(
        actions in prop::collection::vec(arb_action(), 0..40)
    ) {
        let mut state = AccountState::rest();
        for action in &actions {
            state = apply(&state, action);
            if !state.is_active {
                prop_assert_eq!(state.balance, 0);
                prop_assert_eq!(state.loan, 0);
            }
        }
    }

    #[test]
    fn prop_request_loan_never_replaces_existing_loan(state in arb_state()) {
        prop_assume!(state.is_active && state.loan != 0);
        prop_assert_eq!(apply(&state, &Action::RequestLoan), state);
    }

    #[test]
    fn prop_withdraw_never_overdraws(state in arb_state()) {
        prop_assume!(state.is_active);
        let after = apply(&state, &Action::Withdraw);
        if after != state {
            prop_assert!(state.balance > state.withdraw_amount);
            prop_assert!(after.balance > 0 || state.withdraw_amount <= 0);
        }
    }
}
