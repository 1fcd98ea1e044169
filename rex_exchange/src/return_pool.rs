multiversx_sc::imports!();

use common_constants::{END_OF_DAYS, HOURS_PER_BUCKET, SECONDS_PER_HOUR};
use common_structs::RexReturnPool;

use crate::cache::Cache;

/// Income smoothing: fees and donations are amortized into the pool instead
/// of raising the share price at once.
#[multiversx_sc::module]
pub trait ReturnPoolModule: crate::storage::Storage + common_events::EventsModule {
    /// Credits the income released since the last distribution to `total_unlent`.
    fn update_rex_pool(&self, cache: &mut Cache<Self>) {
        if !cache.return_pool_initialized {
            return;
        }

        let released = cache
            .return_pool
            .distribute(&mut cache.return_buckets, cache.timestamp);
        if released > 0u64 && cache.pool_initialized {
            cache.pool.total_unlent += &released;
            cache.pool.total_lendable = &cache.pool.total_unlent + &cache.pool.total_lent;
        }
    }

    /// Queues `fee` in the pending bucket, which opens at the next 12 hour boundary.
    fn add_to_rex_return_pool(&self, cache: &mut Cache<Self>, fee: &BigUint) {
        self.update_rex_pool(cache);
        if *fee == 0u64 {
            return;
        }

        let bucket_interval = HOURS_PER_BUCKET * SECONDS_PER_HOUR;
        let effective_time = cache.timestamp - cache.timestamp % bucket_interval + bucket_interval;
        if !cache.return_pool_initialized {
            cache.return_pool = RexReturnPool::new(fee.clone(), effective_time);
            cache.return_buckets = ManagedVec::new();
            cache.return_pool_initialized = true;
            self.return_bucket_created_event(effective_time, fee);
            return;
        }

        let opens_bucket = cache.return_pool.pending_bucket_time == END_OF_DAYS;
        cache.return_pool.add_income(fee, effective_time);
        if opens_bucket {
            self.return_bucket_created_event(
                effective_time,
                &cache.return_pool.pending_bucket_proceeds,
            );
        }
    }
}
