multiversx_sc::imports!();

use common_errors::{
    ERROR_DEPOSIT_TO_FUND_FIRST, ERROR_INSUFFICIENT_FUNDS, ERROR_POSITIVE_TRANSFER_FROM_FUND,
    ERROR_POSITIVE_TRANSFER_TO_FUND,
};
use common_structs::RexFund;

/// Staged core-token balances and the token transfers behind them.
#[multiversx_sc::module]
pub trait FundModule: crate::storage::Storage + common_events::EventsModule {
    fn transfer_to_fund(&self, owner: &ManagedAddress, amount: &BigUint) {
        require!(*amount > 0u64, ERROR_POSITIVE_TRANSFER_TO_FUND);

        let mapper = self.rex_fund(owner);
        let mut fund = if mapper.is_empty() {
            RexFund {
                balance: BigUint::zero(),
            }
        } else {
            mapper.get()
        };
        fund.balance += amount;
        mapper.set(&fund);
    }

    fn transfer_from_fund(&self, owner: &ManagedAddress, amount: &BigUint) {
        require!(*amount > 0u64, ERROR_POSITIVE_TRANSFER_FROM_FUND);

        let mapper = self.rex_fund(owner);
        require!(!mapper.is_empty(), ERROR_DEPOSIT_TO_FUND_FIRST);

        let mut fund = mapper.get();
        require!(*amount <= fund.balance, ERROR_INSUFFICIENT_FUNDS);
        fund.balance -= amount;
        mapper.set(&fund);
    }

    fn fund_balance(&self, owner: &ManagedAddress) -> BigUint {
        let mapper = self.rex_fund(owner);
        if mapper.is_empty() {
            BigUint::zero()
        } else {
            mapper.get().balance
        }
    }

    /// Returns the amount of the attached payment, which must be the core token.
    fn get_core_payment(&self, error: &'static [u8]) -> BigUint {
        let (token, amount) = self.call_value().egld_or_single_fungible_esdt();
        require!(token == self.core_token().get(), error);

        amount
    }

    fn send_core_token(&self, to: &ManagedAddress, amount: &BigUint) {
        let payment = EgldOrEsdtTokenPayment::new(self.core_token().get(), 0, amount.clone());

        self.tx().to(to).payment(&payment).transfer_if_not_empty();
    }
}
