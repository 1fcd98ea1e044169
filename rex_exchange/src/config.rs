multiversx_sc::imports!();

use common_constants::MAX_MATURITY_BUCKETS;
use common_errors::*;
use common_structs::RexMaturityConfig;

use crate::cache::Cache;

/// Owner-controlled parameters of the exchange.
///
/// Every setter here is restricted to the contract owner and takes effect on
/// the next call that reads the value. None of them touches user records.
#[multiversx_sc::module]
pub trait ConfigModule:
    crate::storage::Storage + common_events::EventsModule
{
    /// Overrides the virtual rent reserve used to price loans.
    ///
    /// # Arguments
    /// - `total_rent`: New reserve, must be positive.
    ///
    /// # Errors
    /// - `ERROR_BALANCE_MUST_BE_POSITIVE`: `total_rent` is zero.
    /// - `ERROR_REX_SYSTEM_NOT_INITIALIZED`: no deposit has seeded the pool yet.
    #[only_owner]
    #[endpoint(setRex)]
    fn set_rex(&self, total_rent: BigUint) {
        require!(total_rent > 0u64, ERROR_BALANCE_MUST_BE_POSITIVE);

        let mut cache = Cache::new(self);
        require!(cache.rex_system_initialized(), ERROR_REX_SYSTEM_NOT_INITIALIZED);

        cache.pool.total_rent = total_rent.clone();
        self.set_rex_event(&total_rent);
        self.update_rex_pool_state_event(cache.timestamp, &cache.pool);
    }

    /// Updates the maturity settings. Omitted arguments keep their current value.
    ///
    /// # Arguments
    /// - `opt_num_of_maturity_buckets`: Days until new shares mature, `1..=30`.
    /// - `opt_sell_matured_rex`: Sell matured shares automatically after buys and sells.
    /// - `opt_buy_rex_to_savings`: Put bought shares straight into savings.
    #[only_owner]
    #[endpoint(setRexMaturity)]
    fn set_rex_maturity(
        &self,
        opt_num_of_maturity_buckets: OptionalValue<u32>,
        opt_sell_matured_rex: OptionalValue<bool>,
        opt_buy_rex_to_savings: OptionalValue<bool>,
    ) {
        let mapper = self.rex_maturity_config();
        let mut config = if mapper.is_empty() {
            RexMaturityConfig::default()
        } else {
            mapper.get()
        };

        if let Some(num_of_maturity_buckets) = opt_num_of_maturity_buckets.into_option() {
            require!(num_of_maturity_buckets > 0, ERROR_MATURITY_BUCKETS_POSITIVE);
            require!(
                num_of_maturity_buckets <= MAX_MATURITY_BUCKETS,
                ERROR_MATURITY_BUCKETS_TOO_HIGH
            );
            config.num_of_maturity_buckets = num_of_maturity_buckets;
        }
        if let Some(sell_matured_rex) = opt_sell_matured_rex.into_option() {
            config.sell_matured_rex = sell_matured_rex;
        }
        if let Some(buy_rex_to_savings) = opt_buy_rex_to_savings.into_option() {
            config.buy_rex_to_savings = buy_rex_to_savings;
        }

        mapper.set(&config);
        self.update_rex_maturity_event(&config);
    }
}
