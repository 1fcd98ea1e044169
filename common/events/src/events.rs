#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("deposit_to_fund")]
    fn deposit_to_fund_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] fund_balance: &BigUint,
    );

    #[event("withdraw_from_fund")]
    fn withdraw_from_fund_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] fund_balance: &BigUint,
    );

    #[event("buy_rex")]
    fn buy_rex_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] payment: &BigUint,
        #[indexed] rex_received: &BigUint,
        #[indexed] maturity: u64,
    );

    #[event("sell_rex")]
    fn sell_rex_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] rex: &BigUint,
        #[indexed] proceeds: &BigUint,
    );

    #[event("sell_order_queued")]
    fn sell_order_queued_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] rex_requested: &BigUint,
        #[indexed] order_time: u64,
    );

    // Emitted by maintenance; proceeds reach the owner's fund on their next action.
    #[event("sell_order_filled")]
    fn sell_order_filled_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] rex_requested: &BigUint,
        #[indexed] proceeds: &BigUint,
    );

    #[event("sell_order_cancelled")]
    fn sell_order_cancelled_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] rex_requested: &BigUint,
    );

    #[event("rent")]
    fn rent_event(
        &self,
        #[indexed] kind: LoanKind,
        #[indexed] loan: &RexLoan<Self::Api>,
    );

    #[event("loan_renewed")]
    fn loan_renewed_event(
        &self,
        #[indexed] kind: LoanKind,
        #[indexed] loan: &RexLoan<Self::Api>,
    );

    #[event("loan_closed")]
    fn loan_closed_event(
        &self,
        #[indexed] kind: LoanKind,
        #[indexed] loan: &RexLoan<Self::Api>,
    );

    #[event("loan_funded")]
    fn loan_funded_event(
        &self,
        #[indexed] kind: LoanKind,
        #[indexed] loan_num: u64,
        #[indexed] amount: &BigUint,
        #[indexed] loan_balance: &BigUint,
    );

    #[event("loan_defunded")]
    fn loan_defunded_event(
        &self,
        #[indexed] kind: LoanKind,
        #[indexed] loan_num: u64,
        #[indexed] amount: &BigUint,
        #[indexed] loan_balance: &BigUint,
    );

    #[event("donate_to_rex")]
    fn donate_to_rex_event(
        &self,
        #[indexed] payer: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] is_namebid: bool,
    );

    // Consumed by the resource manager that grants bandwidth.
    #[event("update_resource_limits")]
    fn update_resource_limits_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] receiver: &ManagedAddress,
        #[indexed] delta_net: &BigInt,
        #[indexed] delta_cpu: &BigInt,
        #[indexed] totals: &ResourceTotals<Self::Api>,
    );

    // Consumed by the voting contract.
    #[event("update_vote_stake")]
    fn update_vote_stake_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] delta_stake: &BigInt,
        #[indexed] vote_stake: &BigUint,
    );

    #[event("update_rex_pool_state")]
    fn update_rex_pool_state_event(
        &self,
        #[indexed] timestamp: u64,
        #[indexed] pool: &RexPool<Self::Api>,
    );

    #[event("return_bucket_created")]
    fn return_bucket_created_event(
        &self,
        #[indexed] activation_time: u64,
        #[indexed] pending_proceeds: &BigUint,
    );

    #[event("update_rex_maturity")]
    fn update_rex_maturity_event(&self, #[indexed] config: &RexMaturityConfig);

    #[event("set_rex")]
    fn set_rex_event(&self, #[indexed] total_rent: &BigUint);
}
