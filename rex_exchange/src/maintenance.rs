multiversx_sc::imports!();

use common_constants::LOAN_TERM_SECONDS;
use common_errors::ERROR_REX_NOT_INITIALIZED;
use common_structs::LoanKind;

use crate::cache::Cache;

/// Bounded catch-up work shared by every caller.
#[multiversx_sc::module]
pub trait MaintenanceModule:
    crate::storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + crate::return_pool::ReturnPoolModule
    + crate::fund::FundModule
    + crate::pool::PoolModule
    + crate::resources::ResourcesModule
    + crate::orders::OrdersModule
{
    /// Runs maintenance with a caller-chosen budget.
    ///
    /// Up to `max` expired CPU loans, `max` expired NET loans and `max` open
    /// sell orders are processed. Whatever remains is picked up by later calls.
    #[endpoint(rexExec)]
    fn rex_exec(&self, max: u16) {
        let mut cache = Cache::new(self);
        self.run_rex(&mut cache, max);
        self.emit_pool_state(&cache);
    }

    fn run_rex(&self, cache: &mut Cache<Self>, max: u16) {
        require!(cache.rex_system_initialized(), ERROR_REX_NOT_INITIALIZED);

        self.update_rex_pool(cache);
        self.process_expired_loans(cache, LoanKind::Cpu, max);
        self.process_expired_loans(cache, LoanKind::Net, max);
        self.fill_rex_orders(cache, max);
    }

    /// Renews or closes up to `max` loans of `kind` that expired by now.
    ///
    /// A loan renews when its balance covers the payment, the payment still
    /// buys more than it costs, and no sell order waits for liquidity.
    /// Otherwise it closes: its capacity is revoked and the balance refunded.
    fn process_expired_loans(&self, cache: &mut Cache<Self>, kind: LoanKind, max: u16) {
        for _ in 0..max {
            let entry = match self.loan_expirations(kind).front() {
                Some(node) => node.get_value_cloned(),
                None => break,
            };
            if entry.expiration > cache.timestamp {
                break;
            }

            let mut loan = match self.loans(kind).get(&entry.loan_num) {
                Some(loan) => loan,
                None => {
                    self.unindex_loan_expiry(kind, entry.loan_num);
                    continue;
                },
            };

            self.remove_loan_from_rex_pool(cache, &loan);
            let rented_tokens = self.price_loan(&cache.pool, &loan.payment);
            let renew_loan = loan.payment <= loan.balance
                && loan.payment < rented_tokens
                && self.rex_loans_available(cache);

            let delta_stake = if renew_loan {
                self.add_loan_to_rex_pool(cache, &loan.payment, &rented_tokens, false);

                let mut delta_stake = BigInt::from_biguint(Sign::Plus, rented_tokens.clone());
                delta_stake -= BigInt::from_biguint(Sign::Plus, loan.total_staked.clone());
                loan.total_staked = rented_tokens;
                loan.expiration += LOAN_TERM_SECONDS;
                loan.balance -= &loan.payment;
                self.update_loan(kind, &loan);
                self.loan_renewed_event(kind, &loan);
                delta_stake
            } else {
                if loan.balance > 0u64 {
                    self.transfer_to_fund(&loan.from, &loan.balance);
                }
                self.erase_loan(kind, &loan);
                self.loan_closed_event(kind, &loan);
                BigInt::from_biguint(Sign::Minus, loan.total_staked.clone())
            };

            if delta_stake != BigInt::zero() {
                let (delta_net, delta_cpu) = kind.split_delta(delta_stake);
                self.update_resource_limits(&loan.from, &loan.receiver, &delta_net, &delta_cpu);
            }
        }
    }
}
