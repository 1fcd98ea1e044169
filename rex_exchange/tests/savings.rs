use multiversx_sc::types::BigUint;
use rex_exchange::{
    account::AccountModule, storage::Storage, ERROR_INSUFFICIENT_AVAILABLE_REX,
    ERROR_INSUFFICIENT_REX_BALANCE, ERROR_INSUFFICIENT_REX_IN_SAVINGS, ERROR_NO_REX_BALANCE,
    ERROR_POSITIVE_REX_AMOUNT,
};
pub mod constants;
pub mod setup;
use constants::*;
use setup::*;

const SECOND_MATURITY: u64 = FIRST_MATURITY + SECONDS_PER_DAY;
const END_OF_DAYS: u64 = u64::MAX;

/// Alice bought on two consecutive days, one cohort each.
fn setup_two_cohorts() -> RexTestState {
    let mut state = RexTestState::new();

    state.deposit(ALICE, 2 * HUNDRED_K_TOKENS);
    state.buy_rex(ALICE, HUNDRED_K_TOKENS);
    state.set_timestamp(START_TIME + SECONDS_PER_DAY);
    state.buy_rex(ALICE, HUNDRED_K_TOKENS);
    state
}

fn assert_buckets(state: &mut RexTestState, expected: Vec<(u64, u64)>) {
    state.check(|sc| {
        let balance = sc.rex_balance(&ALICE.to_managed_address()).get();
        let buckets: Vec<(u64, BigUint<_>)> = balance
            .rex_maturities
            .iter()
            .map(|bucket| (bucket.time, bucket.amount.clone()))
            .collect();
        let expected: Vec<(u64, BigUint<_>)> = expected
            .into_iter()
            .map(|(time, amount)| (time, BigUint::from(amount)))
            .collect();
        assert_eq!(buckets, expected);
    });
}

#[test]
fn test_move_to_savings_drains_newest_cohort_first() {
    let mut state = setup_two_cohorts();

    state.move_to_savings(ALICE, HUNDRED_K_SHARES / 2 * 3);
    assert_buckets(
        &mut state,
        vec![
            (FIRST_MATURITY, HUNDRED_K_SHARES / 2),
            (END_OF_DAYS, HUNDRED_K_SHARES / 2 * 3),
        ],
    );
}

#[test]
fn test_move_to_savings_errors() {
    let mut state = setup_two_cohorts();

    state.move_to_savings(ALICE, HUNDRED_K_SHARES / 2 * 3);
    state.call_error(ALICE, ERROR_INSUFFICIENT_REX_BALANCE, |sc| {
        sc.move_to_savings(BigUint::from(HUNDRED_K_SHARES));
    });
    state.call_error(ALICE, ERROR_POSITIVE_REX_AMOUNT, |sc| {
        sc.move_to_savings(BigUint::zero());
    });
    state.call_error(BOB, ERROR_NO_REX_BALANCE, |sc| {
        sc.move_to_savings(BigUint::from(1u64));
    });
}

#[test]
fn test_move_from_savings_restarts_maturity() {
    let mut state = setup_two_cohorts();

    state.move_to_savings(ALICE, HUNDRED_K_SHARES / 2 * 3);
    state.call_error(ALICE, ERROR_INSUFFICIENT_REX_IN_SAVINGS, |sc| {
        sc.move_from_savings(BigUint::from(2 * HUNDRED_K_SHARES));
    });

    state.move_from_savings(ALICE, HUNDRED_K_SHARES / 2);
    assert_buckets(
        &mut state,
        vec![
            (FIRST_MATURITY, HUNDRED_K_SHARES / 2),
            (SECOND_MATURITY, HUNDRED_K_SHARES / 2),
            (END_OF_DAYS, HUNDRED_K_SHARES),
        ],
    );
}

#[test]
fn test_savings_never_mature() {
    let mut state = setup_two_cohorts();

    state.move_to_savings(ALICE, HUNDRED_K_SHARES / 2 * 3);
    state.move_from_savings(ALICE, HUNDRED_K_SHARES / 2);
    state.call(ALICE, |sc| sc.consolidate());
    assert_buckets(
        &mut state,
        vec![
            (SECOND_MATURITY, HUNDRED_K_SHARES),
            (END_OF_DAYS, HUNDRED_K_SHARES),
        ],
    );

    state.set_timestamp(SECOND_MATURITY);
    state.sell_rex(ALICE, HUNDRED_K_SHARES);
    state.sell_rex_error(ALICE, 1, ERROR_INSUFFICIENT_AVAILABLE_REX);

    state.check(|sc| {
        let balance = sc.rex_balance(&ALICE.to_managed_address()).get();
        assert_eq!(balance.rex_balance, BigUint::from(HUNDRED_K_SHARES));
        assert_eq!(balance.matured_rex, BigUint::zero());
        assert_eq!(
            sc.rex_fund(&ALICE.to_managed_address()).get().balance,
            BigUint::from(HUNDRED_K_TOKENS)
        );
    });
    assert_buckets(&mut state, vec![(END_OF_DAYS, HUNDRED_K_SHARES)]);
}

#[test]
fn test_move_matured_shares_to_savings() {
    let mut state = RexTestState::new();

    state.deposit_and_buy(ALICE, HUNDRED_K_TOKENS);
    state.set_timestamp(FIRST_MATURITY);
    state.move_to_savings(ALICE, HUNDRED_K_SHARES / 10 * 4);

    state.check(|sc| {
        let balance = sc.rex_balance(&ALICE.to_managed_address()).get();
        assert_eq!(balance.matured_rex, BigUint::from(HUNDRED_K_SHARES / 10 * 6));
    });
    assert_buckets(&mut state, vec![(END_OF_DAYS, HUNDRED_K_SHARES / 10 * 4)]);
}

#[test]
fn test_purchase_keeps_savings_last() {
    let mut state = setup_two_cohorts();

    state.move_to_savings(ALICE, HUNDRED_K_SHARES);
    state.deposit(ALICE, HUNDRED_K_TOKENS);
    state.set_timestamp(START_TIME + 2 * SECONDS_PER_DAY);
    state.buy_rex(ALICE, HUNDRED_K_TOKENS);

    assert_buckets(
        &mut state,
        vec![
            (FIRST_MATURITY, HUNDRED_K_SHARES),
            (SECOND_MATURITY + SECONDS_PER_DAY, HUNDRED_K_SHARES),
            (END_OF_DAYS, HUNDRED_K_SHARES),
        ],
    );
}
