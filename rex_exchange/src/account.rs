multiversx_sc::imports!();

use common_constants::DEFAULT_MAINTENANCE_BUDGET;
use common_errors::*;
use common_structs::{LoanKind, RexBalance, RexOrderOutcome};

use crate::cache::Cache;

/// Account-facing endpoints: the fund, share purchases and sales, savings.
#[multiversx_sc::module]
pub trait AccountModule:
    crate::storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + crate::return_pool::ReturnPoolModule
    + crate::fund::FundModule
    + crate::pool::PoolModule
    + crate::resources::ResourcesModule
    + crate::orders::OrdersModule
    + crate::maintenance::MaintenanceModule
{
    /// Deposits core tokens into the caller's fund.
    #[payable]
    #[endpoint(deposit)]
    fn deposit(&self) {
        let amount = self.get_core_payment(ERROR_MUST_DEPOSIT_CORE_TOKEN);
        require!(amount > 0u64, ERROR_MUST_DEPOSIT_POSITIVE_AMOUNT);

        let caller = self.blockchain().get_caller();
        self.transfer_to_fund(&caller, &amount);
        self.deposit_to_fund_event(&caller, &amount, &self.fund_balance(&caller));
    }

    /// Withdraws `amount` from the caller's fund, after collecting a filled sell order.
    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint) {
        require!(amount > 0u64, ERROR_MUST_WITHDRAW_POSITIVE_AMOUNT);

        let caller = self.blockchain().get_caller();
        self.update_rex_account(&caller, &BigUint::zero(), &BigInt::zero(), false);
        self.transfer_from_fund(&caller, &amount);
        self.send_core_token(&caller, &amount);

        self.withdraw_from_fund_event(&caller, &amount, &self.fund_balance(&caller));
    }

    /// Buys shares with `amount` taken from the caller's fund.
    ///
    /// **Process**:
    /// 1. Runs maintenance when the pool exists, so pending income is priced in first.
    /// 2. Mints shares at the current price (or seeds the pool).
    /// 3. Adds them to today's maturity bucket and re-values the vote stake.
    /// 4. Applies the `buy_rex_to_savings` and `sell_matured_rex` settings.
    ///
    /// # Returns
    /// - `BigUint`: shares received.
    #[endpoint(buyRex)]
    fn buy_rex(&self, amount: BigUint) -> BigUint {
        require!(amount > 0u64, ERROR_MUST_USE_POSITIVE_AMOUNT);

        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        if cache.rex_system_initialized() {
            self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);
        }

        self.transfer_from_fund(&caller, &amount);
        let rex_received = self.add_to_rex_pool(&mut cache, &amount);
        let delta_stake = self.add_to_rex_balance(&cache, &caller, &amount, &rex_received);
        self.update_rex_account(&caller, &BigUint::zero(), &delta_stake, false);
        self.buy_rex_event(&caller, &amount, &rex_received, cache.rex_maturity());

        self.process_buy_rex_to_savings(&cache, &caller, &rex_received);
        self.process_sell_matured_rex(&mut cache, &caller);
        self.emit_pool_state(&cache);

        rex_received
    }

    /// Sells `rex` matured shares.
    ///
    /// When the pool cannot pay right away the request is queued (or added to
    /// the caller's open order) and filled later by maintenance. Either way the
    /// open order may not exceed the caller's matured shares.
    #[endpoint(sellRex)]
    fn sell_rex(&self, rex: BigUint) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        self.sell_rex_shares(&mut cache, &caller, &rex);
        self.process_sell_matured_rex(&mut cache, &caller);
        self.emit_pool_state(&cache);
    }

    /// Moves `rex` shares into savings, taking the newest maturity buckets first.
    #[endpoint(moveToSavings)]
    fn move_to_savings(&self, rex: BigUint) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        self.move_shares_to_savings(&cache, &caller, &rex);
    }

    /// Moves `rex` shares out of savings; they mature on the current schedule.
    #[endpoint(moveFromSavings)]
    fn move_from_savings(&self, rex: BigUint) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        let balance_mapper = self.rex_balance(&caller);
        require!(!balance_mapper.is_empty(), ERROR_NO_REX_BALANCE);
        require!(rex > 0u64, ERROR_POSITIVE_REX_AMOUNT);

        let mut balance = balance_mapper.get();
        let rex_in_savings = balance.read_savings();
        require!(rex <= rex_in_savings, ERROR_INSUFFICIENT_REX_IN_SAVINGS);

        balance.process_maturities(cache.timestamp);
        balance.add_to_bucket(cache.rex_maturity(), rex.clone());
        balance.put_savings(rex_in_savings - &rex);
        balance_mapper.set(&balance);

        self.update_rex_account(&caller, &BigUint::zero(), &BigInt::zero(), false);
    }

    /// Merges matured and maturing shares into one bucket on the current
    /// schedule, leaving savings and shares held by an open order in place.
    #[endpoint(consolidate)]
    fn consolidate(&self) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        let balance_mapper = self.rex_balance(&caller);
        require!(!balance_mapper.is_empty(), ERROR_NO_REX_BALANCE);

        let rex_in_sell_order =
            self.update_rex_account(&caller, &BigUint::zero(), &BigInt::zero(), false);
        let mut balance = balance_mapper.get();
        balance.consolidate(&rex_in_sell_order, cache.rex_maturity());
        balance_mapper.set(&balance);
    }

    /// Re-values the caller's vote stake at the current share price.
    #[endpoint(updateRex)]
    fn update_rex(&self) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        let balance_mapper = self.rex_balance(&caller);
        require!(!balance_mapper.is_empty(), ERROR_NO_REX_BALANCE);

        let mut balance = balance_mapper.get();
        let init_stake = BigInt::from_biguint(Sign::Plus, balance.vote_stake.clone());
        balance.vote_stake = cache.pool.share_value(&balance.rex_balance);
        balance.process_maturities(cache.timestamp);
        balance_mapper.set(&balance);

        let mut delta_stake = BigInt::from_biguint(Sign::Plus, balance.vote_stake.clone());
        delta_stake -= init_stake;
        self.update_rex_account(&caller, &BigUint::zero(), &delta_stake, true);
    }

    /// Deletes the caller's records once they are empty: the fund when it is
    /// zero and no loan references the caller, the balance when it holds no shares.
    #[endpoint(closeRex)]
    fn close_rex(&self) {
        let caller = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        if cache.rex_system_initialized() {
            self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);
        }

        self.update_rex_account(&caller, &BigUint::zero(), &BigInt::zero(), false);

        let no_outstanding_loans = self.owner_loans(LoanKind::Cpu, &caller).is_empty()
            && self.owner_loans(LoanKind::Net, &caller).is_empty();
        let fund_mapper = self.rex_fund(&caller);
        if no_outstanding_loans && !fund_mapper.is_empty() && fund_mapper.get().balance == 0u64 {
            fund_mapper.clear();
        }

        let balance_mapper = self.rex_balance(&caller);
        if !balance_mapper.is_empty() {
            require!(
                balance_mapper.get().rex_balance == 0u64,
                ERROR_REMAINING_REX_BALANCE
            );
            balance_mapper.clear();
        }
    }

    /// Records `rex_received` bought for `payment` and returns the vote-stake change.
    fn add_to_rex_balance(
        &self,
        cache: &Cache<Self>,
        owner: &ManagedAddress,
        payment: &BigUint,
        rex_received: &BigUint,
    ) -> BigInt {
        let balance_mapper = self.rex_balance(owner);
        let is_new = balance_mapper.is_empty();
        let mut balance = if is_new {
            RexBalance::new()
        } else {
            balance_mapper.get()
        };
        let init_stake = BigInt::from_biguint(Sign::Plus, balance.vote_stake.clone());

        balance.add_purchase(cache.timestamp, cache.rex_maturity(), rex_received);
        balance.vote_stake = if is_new {
            payment.clone()
        } else {
            cache.pool.share_value(&balance.rex_balance)
        };
        balance_mapper.set(&balance);

        let mut delta_stake = BigInt::from_biguint(Sign::Plus, balance.vote_stake);
        delta_stake -= init_stake;
        delta_stake
    }

    /// Sells `rex` matured shares of `owner` now, or queues the sale.
    fn sell_rex_shares(
        &self,
        cache: &mut Cache<Self>,
        owner: &ManagedAddress,
        rex: &BigUint,
    ) -> RexOrderOutcome<Self::Api> {
        let balance_mapper = self.rex_balance(owner);
        require!(!balance_mapper.is_empty(), ERROR_USER_MUST_FIRST_BUY_REX);
        require!(*rex > 0u64, ERROR_POSITIVE_REX_AMOUNT);

        let mut balance = balance_mapper.get();
        balance.process_maturities(cache.timestamp);
        require!(*rex <= balance.matured_rex, ERROR_INSUFFICIENT_AVAILABLE_REX);

        let outcome = self.fill_rex_order(cache, &mut balance, rex);
        require!(
            !outcome.success || outcome.proceeds > 0u64,
            ERROR_PROCEEDS_NEGLIGIBLE
        );
        balance_mapper.set(&balance);

        let mut pending_sell_order =
            self.update_rex_account(owner, &outcome.proceeds, &outcome.stake_change, false);
        if outcome.success {
            self.sell_rex_event(owner, rex, &outcome.proceeds);
        } else {
            pending_sell_order = self.queue_sell_order(owner, rex, cache.timestamp);
        }
        require!(
            pending_sell_order <= balance.matured_rex,
            ERROR_INSUFFICIENT_FUNDS_FOR_ORDERS
        );

        outcome
    }

    fn move_shares_to_savings(&self, cache: &Cache<Self>, owner: &ManagedAddress, rex: &BigUint) {
        let balance_mapper = self.rex_balance(owner);
        require!(!balance_mapper.is_empty(), ERROR_NO_REX_BALANCE);
        require!(*rex > 0u64, ERROR_POSITIVE_REX_AMOUNT);

        let rex_in_sell_order =
            self.update_rex_account(owner, &BigUint::zero(), &BigInt::zero(), false);
        let mut balance = balance_mapper.get();
        let rex_in_savings = balance.read_savings();
        require!(
            rex + &rex_in_sell_order + &rex_in_savings <= balance.rex_balance,
            ERROR_INSUFFICIENT_REX_BALANCE
        );

        balance.process_maturities(cache.timestamp);
        let moved_rex = balance.drain_for_savings(rex);
        require!(moved_rex == *rex, ERROR_MOVE_TO_SAVINGS_MISMATCH);
        require!(
            rex_in_sell_order <= balance.matured_rex,
            ERROR_MOVE_TO_SAVINGS_LOGIC
        );

        balance.put_savings(rex_in_savings + rex);
        balance_mapper.set(&balance);
    }

    fn process_buy_rex_to_savings(
        &self,
        cache: &Cache<Self>,
        owner: &ManagedAddress,
        rex: &BigUint,
    ) {
        if cache.maturity_config.buy_rex_to_savings && *rex > 0u64 {
            self.move_shares_to_savings(cache, owner, rex);
        }
    }

    /// Sells every matured share of `owner` that no open order already holds.
    fn process_sell_matured_rex(&self, cache: &mut Cache<Self>, owner: &ManagedAddress) {
        if !cache.maturity_config.sell_matured_rex {
            return;
        }

        let balance_mapper = self.rex_balance(owner);
        if balance_mapper.is_empty() {
            return;
        }

        let mut balance = balance_mapper.get();
        balance.process_maturities(cache.timestamp);
        balance_mapper.set(&balance);

        let order_mapper = self.rex_order(owner);
        let rex_in_sell_order = if !order_mapper.is_empty() && order_mapper.get().is_open {
            order_mapper.get().rex_requested
        } else {
            BigUint::zero()
        };
        if balance.matured_rex > rex_in_sell_order {
            let rex = &balance.matured_rex - &rex_in_sell_order;
            self.sell_rex_shares(cache, owner, &rex);
        }
    }
}
