multiversx_sc::imports!();

use common_constants::{DEFAULT_MAINTENANCE_BUDGET, LOAN_TERM_SECONDS};
use common_errors::{
    ERROR_INSUFFICIENT_LOAN_BALANCE, ERROR_LOANS_NOT_AVAILABLE, ERROR_LOAN_EXPIRED,
    ERROR_LOAN_NOT_FOUND, ERROR_LOAN_PRICE_NOT_FAVORABLE, ERROR_MUST_USE_POSITIVE_ASSET_AMOUNT,
    ERROR_NOT_LOAN_CREATOR,
};
use common_structs::{LoanKind, RexLoan};

use crate::cache::Cache;

/// CPU and NET rentals. Both books share the same logic, selected by [`LoanKind`].
#[multiversx_sc::module]
pub trait LoansModule:
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
    /// Rents CPU capacity for `receiver` for 30 days.
    ///
    /// **Process**:
    /// 1. Runs maintenance and requires loans to be available (pool not empty, no open sell order).
    /// 2. Debits `loan_payment + loan_fund` from the caller's fund.
    /// 3. Prices the payment on the rent/unlent curve; the capacity must exceed the payment.
    /// 4. Books the loan and grants the capacity to `receiver`.
    ///
    /// `loan_fund` is kept on the loan to pay future renewals.
    ///
    /// # Returns
    /// - `BigUint`: the capacity granted.
    #[endpoint(rentCpu)]
    fn rent_cpu(
        &self,
        receiver: ManagedAddress,
        loan_payment: BigUint,
        loan_fund: BigUint,
    ) -> BigUint {
        self.rent_rex(LoanKind::Cpu, receiver, loan_payment, loan_fund)
    }

    /// Rents NET capacity for `receiver`. Same rules as `rentCpu`.
    #[endpoint(rentNet)]
    fn rent_net(
        &self,
        receiver: ManagedAddress,
        loan_payment: BigUint,
        loan_fund: BigUint,
    ) -> BigUint {
        self.rent_rex(LoanKind::Net, receiver, loan_payment, loan_fund)
    }

    #[endpoint(fundCpuLoan)]
    fn fund_cpu_loan(&self, loan_num: u64, payment: BigUint) {
        self.fund_rex_loan(LoanKind::Cpu, loan_num, &payment);
    }

    #[endpoint(fundNetLoan)]
    fn fund_net_loan(&self, loan_num: u64, payment: BigUint) {
        self.fund_rex_loan(LoanKind::Net, loan_num, &payment);
    }

    #[endpoint(defundCpuLoan)]
    fn defund_cpu_loan(&self, loan_num: u64, amount: BigUint) {
        self.defund_rex_loan(LoanKind::Cpu, loan_num, &amount);
    }

    #[endpoint(defundNetLoan)]
    fn defund_net_loan(&self, loan_num: u64, amount: BigUint) {
        self.defund_rex_loan(LoanKind::Net, loan_num, &amount);
    }

    fn rent_rex(
        &self,
        kind: LoanKind,
        receiver: ManagedAddress,
        payment: BigUint,
        fund: BigUint,
    ) -> BigUint {
        let from = self.blockchain().get_caller();
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, DEFAULT_MAINTENANCE_BUDGET);

        require!(
            self.rex_loans_available(&cache),
            ERROR_LOANS_NOT_AVAILABLE
        );
        require!(payment > 0u64, ERROR_MUST_USE_POSITIVE_ASSET_AMOUNT);

        self.transfer_from_fund(&from, &(&payment + &fund));

        let rented_tokens = self.price_loan(&cache.pool, &payment);
        require!(payment < rented_tokens, ERROR_LOAN_PRICE_NOT_FAVORABLE);
        self.add_loan_to_rex_pool(&mut cache, &payment, &rented_tokens, true);

        let loan = RexLoan {
            from,
            receiver,
            payment,
            balance: fund,
            total_staked: rented_tokens.clone(),
            loan_num: cache.pool.loan_num,
            expiration: cache.timestamp + LOAN_TERM_SECONDS,
        };
        self.store_loan(kind, &loan);
        self.rent_event(kind, &loan);

        let (delta_net, delta_cpu) =
            kind.split_delta(BigInt::from_biguint(Sign::Plus, rented_tokens.clone()));
        self.update_resource_limits(&loan.from, &loan.receiver, &delta_net, &delta_cpu);
        self.emit_pool_state(&cache);

        rented_tokens
    }

    /// Loads a loan the caller created and that has not expired yet.
    fn require_own_active_loan(
        &self,
        kind: LoanKind,
        loan_num: u64,
        caller: &ManagedAddress,
    ) -> RexLoan<Self::Api> {
        let loan = match self.loans(kind).get(&loan_num) {
            Some(loan) => loan,
            None => sc_panic!(ERROR_LOAN_NOT_FOUND),
        };
        require!(loan.from == *caller, ERROR_NOT_LOAN_CREATOR);
        require!(
            loan.expiration > self.blockchain().get_block_timestamp(),
            ERROR_LOAN_EXPIRED
        );

        loan
    }

    fn fund_rex_loan(&self, kind: LoanKind, loan_num: u64, payment: &BigUint) {
        let caller = self.blockchain().get_caller();
        self.transfer_from_fund(&caller, payment);

        let mut loan = self.require_own_active_loan(kind, loan_num, &caller);
        loan.balance += payment;
        self.loans(kind).insert(loan_num, loan.clone());

        self.loan_funded_event(kind, loan_num, payment, &loan.balance);
    }

    fn defund_rex_loan(&self, kind: LoanKind, loan_num: u64, amount: &BigUint) {
        let caller = self.blockchain().get_caller();

        let mut loan = self.require_own_active_loan(kind, loan_num, &caller);
        require!(loan.balance >= *amount, ERROR_INSUFFICIENT_LOAN_BALANCE);
        loan.balance -= amount;
        self.loans(kind).insert(loan_num, loan.clone());
        self.transfer_to_fund(&caller, amount);

        self.loan_defunded_event(kind, loan_num, amount, &loan.balance);
    }
}
