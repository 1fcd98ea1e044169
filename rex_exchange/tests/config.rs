use multiversx_sc::types::BigUint;
use rex_exchange::{
    config::ConfigModule, storage::Storage, views::ViewsModule, ERROR_BALANCE_MUST_BE_POSITIVE,
    ERROR_MATURITY_BUCKETS_POSITIVE, ERROR_MATURITY_BUCKETS_TOO_HIGH,
    ERROR_REX_SYSTEM_NOT_INITIALIZED,
};
pub mod constants;
pub mod setup;
use constants::*;
use setup::*;

#[test]
fn test_default_maturity_config() {
    let mut state = RexTestState::new();

    state.check(|sc| {
        let config = sc.rex_maturity_config().get();
        assert_eq!(config.num_of_maturity_buckets, 5);
        assert!(!config.sell_matured_rex);
        assert!(!config.buy_rex_to_savings);
        assert_eq!(sc.get_rex_maturity(), FIRST_MATURITY);
    });
}

#[test]
fn test_set_rex_maturity_bounds() {
    let mut state = RexTestState::new();

    state.set_rex_maturity_error(0, ERROR_MATURITY_BUCKETS_POSITIVE);
    state.set_rex_maturity_error(31, ERROR_MATURITY_BUCKETS_TOO_HIGH);

    state.set_rex_maturity(Some(30), None, None);
    state.set_rex_maturity(Some(1), None, None);
    state.check(|sc| {
        assert_eq!(sc.rex_maturity_config().get().num_of_maturity_buckets, 1);
        assert_eq!(sc.get_rex_maturity(), START_DAY + SECONDS_PER_DAY);
    });

    state.deposit_and_buy(ALICE, HUNDRED_K_TOKENS);
    state.set_timestamp(START_DAY + SECONDS_PER_DAY);
    state.sell_rex(ALICE, HUNDRED_K_SHARES);
}

#[test]
fn test_partial_update_keeps_other_settings() {
    let mut state = RexTestState::new();

    state.set_rex_maturity(Some(10), Some(true), None);
    state.set_rex_maturity(None, None, Some(true));

    state.check(|sc| {
        let config = sc.rex_maturity_config().get();
        assert_eq!(config.num_of_maturity_buckets, 10);
        assert!(config.sell_matured_rex);
        assert!(config.buy_rex_to_savings);
    });
}

#[test]
fn test_buy_rex_to_savings() {
    let mut state = RexTestState::new();

    state.set_rex_maturity(None, None, Some(true));
    state.deposit_and_buy(ALICE, HUNDRED_K_TOKENS);

    state.check(|sc| {
        let balance = sc.rex_balance(&ALICE.to_managed_address()).get();
        assert_eq!(balance.rex_maturities.len(), 1);

        let savings = balance.rex_maturities.get(0).clone();
        assert_eq!(savings.time, u64::MAX);
        assert_eq!(savings.amount, BigUint::from(HUNDRED_K_SHARES));
    });
}

#[test]
fn test_sell_matured_rex_on_next_purchase() {
    let mut state = RexTestState::new();

    state.set_rex_maturity(None, Some(true), None);
    state.deposit_and_buy(ALICE, HUNDRED_K_TOKENS);

    state.set_timestamp(FIRST_MATURITY);
    state.deposit_and_buy(ALICE, 1_000_000);

    state.check(|sc| {
        // 1e6 buys 1e10 shares, then the matured 1e13 shares sell for 1e9
        let balance = sc.rex_balance(&ALICE.to_managed_address()).get();
        assert_eq!(balance.rex_balance, BigUint::from(10_000_000_000u64));
        assert_eq!(balance.matured_rex, BigUint::zero());
        assert_eq!(
            sc.rex_fund(&ALICE.to_managed_address()).get().balance,
            BigUint::from(HUNDRED_K_TOKENS)
        );

        let pool = sc.rex_pool().get();
        assert_eq!(pool.total_rex, BigUint::from(10_000_000_000u64));
        assert_eq!(pool.total_lendable, BigUint::from(1_000_000u64));
    });
}

#[test]
fn test_set_rex_overrides_rent_reserve() {
    let mut state = RexTestState::new();

    state.call_error(OWNER_ADDRESS, ERROR_REX_SYSTEM_NOT_INITIALIZED, |sc| {
        sc.set_rex(BigUint::from(300_000_000u64));
    });

    state.deposit_and_buy(ALICE, HUNDRED_K_TOKENS);
    state.call_error(OWNER_ADDRESS, ERROR_BALANCE_MUST_BE_POSITIVE, |sc| {
        sc.set_rex(BigUint::zero());
    });

    state.call(OWNER_ADDRESS, |sc| {
        sc.set_rex(BigUint::from(300_000_000u64));
    });
    state.check(|sc| {
        assert_eq!(sc.rex_pool().get().total_rent, BigUint::from(300_000_000u64));
        // 1e9 * 1e7 / (3e8 + 1e7)
        assert_eq!(
            sc.get_rent_quote(BigUint::from(ONE_THOUSAND_TOKENS)),
            BigUint::from(32_258_064u64)
        );
    });
}
