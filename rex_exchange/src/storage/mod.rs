multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_structs::{
    LoanExpiry, LoanKind, ResourceTotals, RexBalance, RexFund, RexLoan, RexMaturityConfig,
    RexOrder, RexPool, RexReturnBucket, RexReturnPool,
};

/// On-chain state of the exchange.
///
/// Singletons hold the pool and its income smoothing; per-account records are
/// keyed by address. Each loan book is a `MapMapper` by loan number plus an
/// expiration-ordered `LinkedListMapper` and a per-owner set.
#[multiversx_sc::module]
pub trait Storage {
    /// Token accepted for deposits, loans and donations.
    #[view(getCoreToken)]
    #[storage_mapper("core_token")]
    fn core_token(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[storage_mapper("rex_pool")]
    fn rex_pool(&self) -> SingleValueMapper<RexPool<Self::Api>>;

    #[storage_mapper("rex_return_pool")]
    fn rex_return_pool(&self) -> SingleValueMapper<RexReturnPool<Self::Api>>;

    #[storage_mapper("rex_return_buckets")]
    fn rex_return_buckets(
        &self,
    ) -> SingleValueMapper<ManagedVec<Self::Api, RexReturnBucket<Self::Api>>>;

    #[view(getRexMaturityConfig)]
    #[storage_mapper("rex_maturity_config")]
    fn rex_maturity_config(&self) -> SingleValueMapper<RexMaturityConfig>;

    #[storage_mapper("rex_balance")]
    fn rex_balance(&self, owner: &ManagedAddress) -> SingleValueMapper<RexBalance<Self::Api>>;

    #[storage_mapper("rex_fund")]
    fn rex_fund(&self, owner: &ManagedAddress) -> SingleValueMapper<RexFund<Self::Api>>;

    /// At most one sell order per account, open or filled.
    #[storage_mapper("rex_order")]
    fn rex_order(&self, owner: &ManagedAddress) -> SingleValueMapper<RexOrder<Self::Api>>;

    /// Owners of open orders in submission order.
    #[storage_mapper("open_orders")]
    fn open_orders(&self) -> LinkedListMapper<ManagedAddress>;

    #[storage_mapper("open_order_node")]
    fn open_order_node(&self, owner: &ManagedAddress) -> SingleValueMapper<u32>;

    #[storage_mapper("loans")]
    fn loans(&self, kind: LoanKind) -> MapMapper<u64, RexLoan<Self::Api>>;

    /// Loans sorted by `(expiration, loan_num)`, soonest first.
    #[storage_mapper("loan_expirations")]
    fn loan_expirations(&self, kind: LoanKind) -> LinkedListMapper<LoanExpiry>;

    #[storage_mapper("loan_expiry_node")]
    fn loan_expiry_node(&self, kind: LoanKind, loan_num: u64) -> SingleValueMapper<u32>;

    #[storage_mapper("owner_loans")]
    fn owner_loans(&self, kind: LoanKind, owner: &ManagedAddress) -> UnorderedSetMapper<u64>;

    #[storage_mapper("resource_totals")]
    fn resource_totals(
        &self,
        account: &ManagedAddress,
    ) -> SingleValueMapper<ResourceTotals<Self::Api>>;

    /// Writes a loan and indexes it by owner and by expiration.
    fn store_loan(&self, kind: LoanKind, loan: &RexLoan<Self::Api>) {
        self.loans(kind).insert(loan.loan_num, loan.clone());
        self.owner_loans(kind, &loan.from).insert(loan.loan_num);
        self.index_loan_expiry(kind, loan.expiration, loan.loan_num);
    }

    /// Rewrites a loan whose expiration moved, keeping the expiry index sorted.
    fn update_loan(&self, kind: LoanKind, loan: &RexLoan<Self::Api>) {
        self.unindex_loan_expiry(kind, loan.loan_num);
        self.loans(kind).insert(loan.loan_num, loan.clone());
        self.index_loan_expiry(kind, loan.expiration, loan.loan_num);
    }

    fn erase_loan(&self, kind: LoanKind, loan: &RexLoan<Self::Api>) {
        self.unindex_loan_expiry(kind, loan.loan_num);
        self.owner_loans(kind, &loan.from).swap_remove(&loan.loan_num);
        self.loans(kind).remove(&loan.loan_num);
    }

    /// Walks from the back since new and renewed loans expire last most of the time.
    fn index_loan_expiry(&self, kind: LoanKind, expiration: u64, loan_num: u64) {
        let mut expirations = self.loan_expirations(kind);
        let entry = LoanExpiry {
            expiration,
            loan_num,
        };

        let mut cursor = expirations.back();
        while let Some(mut node) = cursor {
            let current = node.get_value_cloned();
            if (current.expiration, current.loan_num) <= (expiration, loan_num) {
                if let Some(new_node) = expirations.push_after(&mut node, entry) {
                    self.loan_expiry_node(kind, loan_num)
                        .set(new_node.get_node_id());
                }
                return;
            }

            cursor = expirations.get_node_by_id(node.get_prev_node_id());
        }

        let new_node = expirations.push_front(entry);
        self.loan_expiry_node(kind, loan_num)
            .set(new_node.get_node_id());
    }

    fn unindex_loan_expiry(&self, kind: LoanKind, loan_num: u64) {
        let node_mapper = self.loan_expiry_node(kind, loan_num);
        if node_mapper.is_empty() {
            return;
        }

        self.loan_expirations(kind)
            .remove_node_by_id(node_mapper.get());
        node_mapper.clear();
    }
}
