multiversx_sc::imports!();

use common_errors::{ERROR_INSUFFICIENT_CPU_BANDWIDTH, ERROR_INSUFFICIENT_NET_BANDWIDTH};
use common_structs::ResourceTotals;

/// Outbound collaborators: the bandwidth ledger and vote-stake reporting.
#[multiversx_sc::module]
pub trait ResourcesModule: crate::storage::Storage + common_events::EventsModule {
    /// Applies signed NET/CPU deltas to `receiver`'s granted capacity and
    /// reports them. Totals may never go negative; an emptied record is removed.
    fn update_resource_limits(
        &self,
        from: &ManagedAddress,
        receiver: &ManagedAddress,
        delta_net: &BigInt,
        delta_cpu: &BigInt,
    ) {
        let zero = BigInt::zero();
        if *delta_net == zero && *delta_cpu == zero {
            return;
        }

        let mapper = self.resource_totals(receiver);
        let current = if mapper.is_empty() {
            ResourceTotals {
                net_weight: BigUint::zero(),
                cpu_weight: BigUint::zero(),
            }
        } else {
            mapper.get()
        };

        let mut net = BigInt::from_biguint(Sign::Plus, current.net_weight);
        net += delta_net.clone();
        let mut cpu = BigInt::from_biguint(Sign::Plus, current.cpu_weight);
        cpu += delta_cpu.clone();
        require!(net >= zero, ERROR_INSUFFICIENT_NET_BANDWIDTH);
        require!(cpu >= zero, ERROR_INSUFFICIENT_CPU_BANDWIDTH);

        let totals = ResourceTotals {
            net_weight: net.magnitude(),
            cpu_weight: cpu.magnitude(),
        };
        self.update_resource_limits_event(from, receiver, delta_net, delta_cpu, &totals);

        if totals.is_empty() {
            mapper.clear();
        } else {
            mapper.set(&totals);
        }
    }

    /// Reports a vote-stake change to the voting collaborator.
    fn update_voting_power(&self, owner: &ManagedAddress, delta_stake: &BigInt, force: bool) {
        if !force && *delta_stake == BigInt::zero() {
            return;
        }

        let balance_mapper = self.rex_balance(owner);
        let vote_stake = if balance_mapper.is_empty() {
            BigUint::zero()
        } else {
            balance_mapper.get().vote_stake
        };
        self.update_vote_stake_event(owner, delta_stake, &vote_stake);
    }
}
