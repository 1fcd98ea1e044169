multiversx_sc::imports!();

use common_errors::{ERROR_NO_SELL_ORDER_SCHEDULED, ERROR_SELL_ORDER_FILLED};
use common_structs::RexOrder;

use crate::cache::Cache;

/// Sell orders that could not be paid out immediately.
///
/// Open orders are kept in submission order and filled by maintenance. A filled
/// order only stages its proceeds; they reach the owner's fund the next time
/// the owner calls an order-touching endpoint.
#[multiversx_sc::module]
pub trait OrdersModule:
    crate::storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + crate::return_pool::ReturnPoolModule
    + crate::fund::FundModule
    + crate::pool::PoolModule
    + crate::resources::ResourcesModule
{
    /// Cancels the caller's sell order while it is still open.
    #[endpoint(cancelRexOrder)]
    fn cancel_rex_order(&self) {
        let caller = self.blockchain().get_caller();
        let order_mapper = self.rex_order(&caller);
        require!(!order_mapper.is_empty(), ERROR_NO_SELL_ORDER_SCHEDULED);

        let order = order_mapper.get();
        require!(order.is_open, ERROR_SELL_ORDER_FILLED);

        self.remove_open_order(&caller);
        order_mapper.clear();
        self.sell_order_cancelled_event(&caller, &order.rex_requested);
    }

    /// Settles a filled order of `owner` together with `proceeds` and
    /// `delta_stake` from the current action.
    ///
    /// Returns the shares still committed to an open order, zero if none.
    fn update_rex_account(
        &self,
        owner: &ManagedAddress,
        proceeds: &BigUint,
        delta_stake: &BigInt,
        force_vote_update: bool,
    ) -> BigUint {
        let mut to_fund = proceeds.clone();
        let mut to_stake = delta_stake.clone();
        let mut rex_in_sell_order = BigUint::zero();

        let order_mapper = self.rex_order(owner);
        if !order_mapper.is_empty() {
            let order = order_mapper.get();
            if order.is_open {
                rex_in_sell_order = order.rex_requested;
            } else {
                to_fund += &order.proceeds;
                to_stake += order.stake_change;
                order_mapper.clear();
            }
        }

        if to_fund > 0u64 {
            self.transfer_to_fund(owner, &to_fund);
        }
        self.update_voting_power(owner, &to_stake, force_vote_update);

        rex_in_sell_order
    }

    /// Opens an order for `rex` or adds it to the owner's open order.
    /// Returns the total requested by the order.
    fn queue_sell_order(&self, owner: &ManagedAddress, rex: &BigUint, now: u64) -> BigUint {
        let order_mapper = self.rex_order(owner);
        let order = if order_mapper.is_empty() {
            let node = self.open_orders().push_back(owner.clone());
            self.open_order_node(owner).set(node.get_node_id());
            RexOrder::new(owner.clone(), rex.clone(), now)
        } else {
            let mut order = order_mapper.get();
            order.rex_requested += rex;
            order
        };

        order_mapper.set(&order);
        self.sell_order_queued_event(owner, &order.rex_requested, order.order_time);

        order.rex_requested
    }

    /// Fills up to `max` open orders, oldest first. Stops at the first order
    /// the pool cannot pay.
    fn fill_rex_orders(&self, cache: &mut Cache<Self>, max: u16) {
        for _ in 0..max {
            let front = match self.open_orders().front() {
                Some(node) => node,
                None => break,
            };

            let owner = front.get_value_cloned();
            let balance_mapper = self.rex_balance(&owner);
            if balance_mapper.is_empty() {
                break;
            }

            let order_mapper = self.rex_order(&owner);
            let mut order = order_mapper.get();
            let mut balance = balance_mapper.get();
            let outcome = self.fill_rex_order(cache, &mut balance, &order.rex_requested);
            if !outcome.success {
                break;
            }

            balance_mapper.set(&balance);
            order.close(&outcome);
            order_mapper.set(&order);
            self.remove_open_order(&owner);

            self.sell_order_filled_event(&owner, &order.rex_requested, &order.proceeds);
        }
    }

    fn remove_open_order(&self, owner: &ManagedAddress) {
        let node_mapper = self.open_order_node(owner);
        if node_mapper.is_empty() {
            return;
        }

        self.open_orders().remove_node_by_id(node_mapper.get());
        node_mapper.clear();
    }
}
