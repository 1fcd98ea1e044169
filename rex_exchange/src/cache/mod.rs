use common_structs::{RexMaturityConfig, RexPool, RexReturnBucket, RexReturnPool};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// In-memory view of the exchange singletons for the duration of one call.
///
/// Loaded once by `new`, mutated by the pool, loan and order routines, and
/// written back on drop. A singleton that was never created stays absent in
/// storage until a routine marks it initialized.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage,
{
    sc_ref: &'a C,
    pub pool: RexPool<C::Api>,
    pub pool_initialized: bool,
    pub return_pool: RexReturnPool<C::Api>,
    pub return_pool_initialized: bool,
    /// Active return buckets, oldest first.
    pub return_buckets: ManagedVec<C::Api, RexReturnBucket<C::Api>>,
    pub maturity_config: RexMaturityConfig,
    /// Block timestamp in seconds.
    pub timestamp: u64,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage,
{
    pub fn new(sc_ref: &'a C) -> Self {
        let pool_mapper = sc_ref.rex_pool();
        let pool_initialized = !pool_mapper.is_empty();
        let pool = if pool_initialized {
            pool_mapper.get()
        } else {
            RexPool::new()
        };

        let return_pool_mapper = sc_ref.rex_return_pool();
        let return_pool_initialized = !return_pool_mapper.is_empty();
        let (return_pool, return_buckets) = if return_pool_initialized {
            (return_pool_mapper.get(), sc_ref.rex_return_buckets().get())
        } else {
            (RexReturnPool::empty(), ManagedVec::new())
        };

        let config_mapper = sc_ref.rex_maturity_config();
        let maturity_config = if config_mapper.is_empty() {
            RexMaturityConfig::default()
        } else {
            config_mapper.get()
        };

        Cache {
            pool,
            pool_initialized,
            return_pool,
            return_pool_initialized,
            return_buckets,
            maturity_config,
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            sc_ref,
        }
    }

    pub fn rex_system_initialized(&self) -> bool {
        self.pool_initialized
    }

    /// Initialized and holding outstanding shares.
    pub fn rex_available(&self) -> bool {
        self.pool_initialized && self.pool.is_available()
    }

    /// Maturity date for shares bought or moved out of savings in this call.
    pub fn rex_maturity(&self) -> u64 {
        self.maturity_config.maturity_at(self.timestamp)
    }
}

impl<C> Drop for Cache<'_, C>
where
    C: crate::storage::Storage,
{
    fn drop(&mut self) {
        // commit the singletons that exist
        if self.pool_initialized {
            self.sc_ref.rex_pool().set(&self.pool);
        }
        if self.return_pool_initialized {
            self.sc_ref.rex_return_pool().set(&self.return_pool);
            self.sc_ref.rex_return_buckets().set(&self.return_buckets);
        }
    }
}
