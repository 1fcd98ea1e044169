multiversx_sc::imports!();

use common_constants::{INIT_TOTAL_RENT, REX_RATIO};
use common_errors::{
    ERROR_LENDABLE_POOL_EMPTY, ERROR_MUST_USE_CORE_TOKEN, ERROR_QUANTITY_MUST_BE_POSITIVE,
    ERROR_REX_SYSTEM_NOT_INITIALIZED, ERROR_SHARE_COUNT_MISMATCH, ERROR_TOTAL_LENT_NEGATIVE,
    ERROR_UNLENT_NEGATIVE,
};
use common_structs::{RexBalance, RexLoan, RexOrderOutcome, RexPool};

use crate::cache::Cache;

/// Share accounting and loan bookkeeping against the pool totals.
#[multiversx_sc::module]
pub trait PoolModule:
    crate::storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + crate::return_pool::ReturnPoolModule
    + crate::fund::FundModule
{
    /// Donates core tokens to the shareholders, amortized through the return pool.
    #[payable]
    #[endpoint(donateToRex)]
    fn donate_to_rex(&self) {
        let amount = self.get_core_payment(ERROR_MUST_USE_CORE_TOKEN);
        let caller = self.blockchain().get_caller();

        let mut cache = Cache::new(self);
        self.add_donation(&mut cache, &caller, &amount, false);
    }

    /// Routes name auction proceeds to the shareholders.
    #[only_owner]
    #[payable]
    #[endpoint(channelNamebidToRex)]
    fn channel_namebid_to_rex(&self) {
        let amount = self.get_core_payment(ERROR_MUST_USE_CORE_TOKEN);
        let caller = self.blockchain().get_caller();

        let mut cache = Cache::new(self);
        self.add_donation(&mut cache, &caller, &amount, true);
    }

    fn add_donation(
        &self,
        cache: &mut Cache<Self>,
        payer: &ManagedAddress,
        amount: &BigUint,
        is_namebid: bool,
    ) {
        require!(cache.rex_available(), ERROR_REX_SYSTEM_NOT_INITIALIZED);
        require!(*amount > 0u64, ERROR_QUANTITY_MUST_BE_POSITIVE);

        if is_namebid {
            cache.pool.namebid_proceeds += amount;
        }
        self.add_to_rex_return_pool(cache, amount);

        self.donate_to_rex_event(payer, amount, is_namebid);
        self.emit_pool_state(cache);
    }

    /// Mints shares for `payment`.
    ///
    /// The first deposit, or one into a pool whose shares were all redeemed,
    /// seeds the pool at `REX_RATIO` shares per unit with the initial rent
    /// reserve. Later deposits mint in proportion to the lendable increase so
    /// the share price is unchanged.
    fn add_to_rex_pool(&self, cache: &mut Cache<Self>, payment: &BigUint) -> BigUint {
        let rex_ratio = BigUint::from(REX_RATIO);
        if !cache.pool_initialized || !cache.pool.is_available() {
            let rex_received = payment * &rex_ratio;
            if !cache.pool_initialized {
                cache.pool = RexPool::new();
                cache.pool_initialized = true;
            }

            let pool = &mut cache.pool;
            pool.total_lendable = payment.clone();
            pool.total_lent = BigUint::zero();
            pool.total_unlent = payment.clone();
            pool.total_rent = BigUint::from(INIT_TOTAL_RENT);
            pool.total_rex = rex_received.clone();
            return rex_received;
        }

        let pool = &mut cache.pool;
        require!(pool.total_lendable > 0u64, ERROR_LENDABLE_POOL_EMPTY);

        let s1 = &pool.total_lendable + payment;
        let r1 = self.mul_div_floor(&s1, &pool.total_rex, &pool.total_lendable);
        let rex_received = &r1 - &pool.total_rex;

        require!(s1 >= pool.total_lent, ERROR_UNLENT_NEGATIVE);
        pool.total_unlent = &s1 - &pool.total_lent;
        pool.total_lendable = s1;
        pool.total_rex = r1;

        rex_received
    }

    /// Redeems `rex` matured shares of `balance` if the pool can pay without
    /// touching the reserve kept for loan renewals. Nothing changes otherwise.
    fn fill_rex_order(
        &self,
        cache: &mut Cache<Self>,
        balance: &mut RexBalance<Self::Api>,
        rex: &BigUint,
    ) -> RexOrderOutcome<Self::Api> {
        let pool = &mut cache.pool;
        require!(
            *rex <= pool.total_rex && *rex <= balance.rex_balance,
            ERROR_SHARE_COUNT_MISMATCH
        );

        let s0 = pool.total_lendable.clone();
        let r0 = pool.total_rex.clone();
        let proceeds = self.mul_div_floor(rex, &s0, &r0);
        if !pool.can_pay_out(&proceeds) {
            return RexOrderOutcome::unfilled();
        }

        let init_vote_stake = balance.vote_stake.clone();
        let current_stake_value = self.mul_div_floor(&balance.rex_balance, &s0, &r0);

        pool.total_rex = &r0 - rex;
        pool.total_lendable = &s0 - &proceeds;
        pool.total_unlent = &pool.total_lendable - &pool.total_lent;

        balance.vote_stake = current_stake_value - &proceeds;
        balance.remove_sold(rex);

        let mut stake_change = BigInt::from_biguint(Sign::Plus, balance.vote_stake.clone());
        stake_change -= BigInt::from_biguint(Sign::Plus, init_vote_stake);

        RexOrderOutcome {
            success: true,
            proceeds,
            stake_change,
        }
    }

    /// Capacity granted for `payment` at the current rent/unlent reserves.
    fn price_loan(&self, pool: &RexPool<Self::Api>, payment: &BigUint) -> BigUint {
        self.get_bancor_output(&pool.total_rent, &pool.total_unlent, payment)
    }

    /// Books a new or renewed loan: the fee goes to the return pool and the
    /// rented amount moves from unlent to lent.
    fn add_loan_to_rex_pool(
        &self,
        cache: &mut Cache<Self>,
        payment: &BigUint,
        rented_tokens: &BigUint,
        new_loan: bool,
    ) {
        self.add_to_rex_return_pool(cache, payment);

        let pool = &mut cache.pool;
        require!(pool.total_unlent >= *rented_tokens, ERROR_UNLENT_NEGATIVE);
        pool.total_rent += payment;
        pool.total_unlent -= rented_tokens;
        pool.total_lent += rented_tokens;
        if new_loan {
            pool.loan_num += 1;
        }
    }

    /// Returns an expired loan's stake to unlent, lowering `total_rent` by the
    /// curve-equivalent of the liquidity coming back.
    fn remove_loan_from_rex_pool(&self, cache: &mut Cache<Self>, loan: &RexLoan<Self::Api>) {
        let pool = &mut cache.pool;
        let delta_total_rent =
            self.get_bancor_output(&pool.total_unlent, &pool.total_rent, &loan.total_staked);
        require!(
            pool.total_lent >= loan.total_staked,
            ERROR_TOTAL_LENT_NEGATIVE
        );

        pool.total_rent -= &delta_total_rent;
        pool.total_unlent += &loan.total_staked;
        pool.total_lent -= &loan.total_staked;
        pool.total_lendable = &pool.total_unlent + &pool.total_lent;
    }

    /// Loans need a non-empty pool and no sell order waiting for liquidity.
    fn rex_loans_available(&self, cache: &Cache<Self>) -> bool {
        cache.rex_available() && self.open_orders().is_empty()
    }

    fn emit_pool_state(&self, cache: &Cache<Self>) {
        if cache.pool_initialized {
            self.update_rex_pool_state_event(cache.timestamp, &cache.pool);
        }
    }
}
