multiversx_sc::imports!();

use common_structs::{
    LoanKind, ResourceTotals, RexBalance, RexFund, RexLoan, RexMaturityConfig, RexOrder, RexPool,
    RexReturnBucket, RexReturnPool,
};

/// Read-only queries. Records that were never created come back as empty
/// optionals instead of failing to decode.
#[multiversx_sc::module]
pub trait ViewsModule:
    crate::storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + crate::return_pool::ReturnPoolModule
    + crate::fund::FundModule
    + crate::pool::PoolModule
{
    #[view(getRexPool)]
    fn get_rex_pool(&self) -> OptionalValue<RexPool<Self::Api>> {
        let mapper = self.rex_pool();
        if mapper.is_empty() {
            return OptionalValue::None;
        }

        OptionalValue::Some(mapper.get())
    }

    #[view(getRexReturnPool)]
    fn get_rex_return_pool(&self) -> OptionalValue<RexReturnPool<Self::Api>> {
        let mapper = self.rex_return_pool();
        if mapper.is_empty() {
            return OptionalValue::None;
        }

        OptionalValue::Some(mapper.get())
    }

    /// Active return buckets, oldest first.
    #[view(getRexReturnBuckets)]
    fn get_rex_return_buckets(&self) -> ManagedVec<RexReturnBucket<Self::Api>> {
        let mapper = self.rex_return_buckets();
        if mapper.is_empty() {
            return ManagedVec::new();
        }

        mapper.get()
    }

    #[view(getRexBalance)]
    fn get_rex_balance(&self, owner: ManagedAddress) -> OptionalValue<RexBalance<Self::Api>> {
        let mapper = self.rex_balance(&owner);
        if mapper.is_empty() {
            return OptionalValue::None;
        }

        OptionalValue::Some(mapper.get())
    }

    #[view(getRexFund)]
    fn get_rex_fund(&self, owner: ManagedAddress) -> OptionalValue<RexFund<Self::Api>> {
        let mapper = self.rex_fund(&owner);
        if mapper.is_empty() {
            return OptionalValue::None;
        }

        OptionalValue::Some(mapper.get())
    }

    #[view(getRexOrder)]
    fn get_rex_order(&self, owner: ManagedAddress) -> OptionalValue<RexOrder<Self::Api>> {
        let mapper = self.rex_order(&owner);
        if mapper.is_empty() {
            return OptionalValue::None;
        }

        OptionalValue::Some(mapper.get())
    }

    #[view(getLoan)]
    fn get_loan(&self, kind: LoanKind, loan_num: u64) -> OptionalValue<RexLoan<Self::Api>> {
        self.loans(kind).get(&loan_num).into()
    }

    #[view(getLoansByOwner)]
    fn get_loans_by_owner(
        &self,
        kind: LoanKind,
        owner: ManagedAddress,
    ) -> MultiValueEncoded<RexLoan<Self::Api>> {
        let loans = self.loans(kind);
        let mut result = MultiValueEncoded::new();
        for loan_num in self.owner_loans(kind, &owner).iter() {
            if let Some(loan) = loans.get(&loan_num) {
                result.push(loan);
            }
        }

        result
    }

    #[view(getResourceTotals)]
    fn get_resource_totals(&self, account: ManagedAddress) -> ResourceTotals<Self::Api> {
        let mapper = self.resource_totals(&account);
        if mapper.is_empty() {
            return ResourceTotals {
                net_weight: BigUint::zero(),
                cpu_weight: BigUint::zero(),
            };
        }

        mapper.get()
    }

    /// Unlent capital that redemptions may draw on right now.
    #[view(getAvailableUnlent)]
    fn get_available_unlent(&self) -> BigUint {
        self.stored_rex_pool().available_unlent()
    }

    /// Capacity a new loan paying `payment` would receive at current reserves.
    /// Pending return-pool income is not applied.
    #[view(getRentQuote)]
    fn get_rent_quote(&self, payment: BigUint) -> BigUint {
        let pool = self.stored_rex_pool();
        if !pool.is_available() {
            return BigUint::zero();
        }

        self.price_loan(&pool, &payment)
    }

    /// Core-token value of `owner`'s shares at the current share price.
    #[view(getRexValue)]
    fn get_rex_value(&self, owner: ManagedAddress) -> BigUint {
        let mapper = self.rex_balance(&owner);
        if mapper.is_empty() {
            return BigUint::zero();
        }

        self.stored_rex_pool().share_value(&mapper.get().rex_balance)
    }

    /// Maturity date that shares bought now would get.
    #[view(getRexMaturity)]
    fn get_rex_maturity(&self) -> u64 {
        let mapper = self.rex_maturity_config();
        let config = if mapper.is_empty() {
            RexMaturityConfig::default()
        } else {
            mapper.get()
        };

        config.maturity_at(self.blockchain().get_block_timestamp())
    }

    /// Pool as stored. Views skip `Cache`, which writes back on drop.
    fn stored_rex_pool(&self) -> RexPool<Self::Api> {
        let mapper = self.rex_pool();
        if mapper.is_empty() {
            return RexPool::new();
        }

        mapper.get()
    }
}
