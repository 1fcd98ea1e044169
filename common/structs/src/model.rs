#![no_std]

use common_constants::{
    DEFAULT_MATURITY_BUCKETS, DIST_INTERVAL_SECONDS, END_OF_DAYS, SECONDS_PER_DAY,
    TOTAL_INTERVALS, UNLENT_RESERVE_DIVISOR,
};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Which rented resource a loan book holds.
#[type_abi]
#[derive(
    NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, Copy, PartialEq, Eq, Debug,
)]
pub enum LoanKind {
    Cpu,
    Net,
}

impl LoanKind {
    /// Splits a stake delta into `(delta_net, delta_cpu)` for the resource ledger.
    pub fn split_delta<M: ManagedTypeApi>(&self, delta: BigInt<M>) -> (BigInt<M>, BigInt<M>) {
        match self {
            LoanKind::Cpu => (BigInt::zero(), delta),
            LoanKind::Net => (delta, BigInt::zero()),
        }
    }
}

/// Global pool state.
///
/// `total_lendable == total_lent + total_unlent` holds after every call and
/// `total_rex` is the outstanding share supply priced against `total_lendable`.
/// `total_rent` is the virtual reserve on the other side of the loan pricing curve.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexPool<M: ManagedTypeApi> {
    pub total_lent: BigUint<M>,
    pub total_unlent: BigUint<M>,
    pub total_rent: BigUint<M>,
    pub total_lendable: BigUint<M>,
    pub total_rex: BigUint<M>,
    pub namebid_proceeds: BigUint<M>,
    pub loan_num: u64,
}

impl<M: ManagedTypeApi> Default for RexPool<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ManagedTypeApi> RexPool<M> {
    pub fn new() -> Self {
        RexPool {
            total_lent: BigUint::zero(),
            total_unlent: BigUint::zero(),
            total_rent: BigUint::zero(),
            total_lendable: BigUint::zero(),
            total_rex: BigUint::zero(),
            namebid_proceeds: BigUint::zero(),
            loan_num: 0,
        }
    }

    /// A pool is available once it carries outstanding shares.
    pub fn is_available(&self) -> bool {
        self.total_rex > 0u64
    }

    /// Core-token value of `shares` at the current share price, floored.
    pub fn share_value(&self, shares: &BigUint<M>) -> BigUint<M> {
        if self.total_rex == 0u64 {
            return BigUint::zero();
        }

        shares * &self.total_lendable / &self.total_rex
    }

    /// Part of `total_lent` that must stay unlent so loans can still renew.
    pub fn unlent_lower_bound(&self) -> BigUint<M> {
        &self.total_lent / &BigUint::from(UNLENT_RESERVE_DIVISOR)
    }

    /// `proceeds <= total_unlent - total_lent / 10`. A negative right-hand side
    /// means nothing can be paid out.
    pub fn can_pay_out(&self, proceeds: &BigUint<M>) -> bool {
        proceeds + &self.unlent_lower_bound() <= self.total_unlent
    }

    /// Unlent capital currently free for redemptions, floored at zero.
    pub fn available_unlent(&self) -> BigUint<M> {
        let lower_bound = self.unlent_lower_bound();
        if self.total_unlent > lower_bound {
            &self.total_unlent - &lower_bound
        } else {
            BigUint::zero()
        }
    }
}

/// Income smoothing state. `pending_bucket_time == END_OF_DAYS` means no
/// pending bucket is open; `oldest_bucket_time == 0` means no bucket is active.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexReturnPool<M: ManagedTypeApi> {
    pub last_dist_time: u64,
    pub pending_bucket_time: u64,
    pub oldest_bucket_time: u64,
    pub pending_bucket_proceeds: BigUint<M>,
    pub current_rate_of_increase: BigUint<M>,
    pub proceeds: BigInt<M>,
}

#[type_abi]
#[derive(
    ManagedVecItem, NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug,
)]
pub struct RexReturnBucket<M: ManagedTypeApi> {
    pub time: u64,
    pub rate: BigUint<M>,
}

impl<M: ManagedTypeApi> RexReturnPool<M> {
    /// Placeholder for a return pool that has not received income yet.
    pub fn empty() -> Self {
        Self::new(BigUint::zero(), END_OF_DAYS)
    }

    /// Opens the return pool with its first income; distribution starts at `activation_time`.
    pub fn new(fee: BigUint<M>, activation_time: u64) -> Self {
        RexReturnPool {
            last_dist_time: activation_time,
            pending_bucket_time: activation_time,
            oldest_bucket_time: 0,
            pending_bucket_proceeds: fee.clone(),
            current_rate_of_increase: BigUint::zero(),
            proceeds: BigInt::from_biguint(Sign::Plus, fee),
        }
    }

    pub fn add_income(&mut self, fee: &BigUint<M>, activation_time: u64) {
        self.pending_bucket_proceeds += fee;
        self.proceeds += BigInt::from_biguint(Sign::Plus, fee.clone());
        if self.pending_bucket_time == END_OF_DAYS {
            self.pending_bucket_time = activation_time;
        }
    }

    /// Advances the smoothing clock to `now` and returns the amount released
    /// into the pool's unlent capital.
    ///
    /// Steps: release the running rate for every elapsed interval, turn a due
    /// pending bucket into a new rate bucket, retire buckets older than the
    /// horizon (refunding their overtime), then absorb any negative carry.
    pub fn distribute(
        &mut self,
        buckets: &mut ManagedVec<M, RexReturnBucket<M>>,
        now: u64,
    ) -> BigUint<M> {
        let effective_time = now - now % DIST_INTERVAL_SECONDS;
        if effective_time <= self.last_dist_time {
            return BigUint::zero();
        }

        let elapsed = elapsed_intervals(effective_time, self.last_dist_time);
        let mut change_estimate = signed(&(&self.current_rate_of_increase * &elapsed));

        if self.pending_bucket_time <= effective_time {
            let total_intervals = BigUint::from(TOTAL_INTERVALS);
            let remainder = &self.pending_bucket_proceeds % &total_intervals;
            let new_rate = (&self.pending_bucket_proceeds - &remainder) / &total_intervals;
            let new_time = self.pending_bucket_time;

            self.current_rate_of_increase += &new_rate;
            let catch_up = &new_rate * &elapsed_intervals(effective_time, new_time);
            change_estimate += signed(&(remainder + catch_up));

            self.pending_bucket_proceeds = BigUint::zero();
            self.pending_bucket_time = END_OF_DAYS;
            if new_time < self.oldest_bucket_time {
                self.oldest_bucket_time = new_time;
            }

            insert_return_bucket(buckets, new_time, new_rate);
        }

        self.proceeds -= change_estimate.clone();
        self.last_dist_time = effective_time;

        let horizon = TOTAL_INTERVALS * DIST_INTERVAL_SECONDS;
        let time_threshold = effective_time.saturating_sub(horizon);
        if self.oldest_bucket_time <= time_threshold {
            let mut expired_rate = BigUint::zero();
            let mut surplus = BigUint::zero();
            while !buckets.is_empty() {
                let bucket = buckets.get(0).clone();
                if bucket.time > time_threshold {
                    break;
                }

                let overtime = elapsed_intervals(effective_time, bucket.time + horizon);
                surplus += &bucket.rate * &overtime;
                expired_rate += &bucket.rate;
                buckets.remove(0);
            }

            self.oldest_bucket_time = if buckets.is_empty() {
                0
            } else {
                buckets.get(0).time
            };
            if expired_rate > 0u64 {
                self.current_rate_of_increase -= &expired_rate;
            }
            if surplus > 0u64 {
                let surplus = signed(&surplus);
                change_estimate -= surplus.clone();
                self.proceeds += surplus;
            }
        }

        let zero = BigInt::zero();
        if change_estimate > zero && self.proceeds < zero {
            change_estimate += self.proceeds.clone();
            self.proceeds = BigInt::zero();
        }

        if change_estimate > zero {
            change_estimate.magnitude()
        } else {
            BigUint::zero()
        }
    }
}

fn elapsed_intervals<M: ManagedTypeApi>(later: u64, earlier: u64) -> BigUint<M> {
    BigUint::from(later.saturating_sub(earlier) / DIST_INTERVAL_SECONDS)
}

fn signed<M: ManagedTypeApi>(value: &BigUint<M>) -> BigInt<M> {
    BigInt::from_biguint(Sign::Plus, value.clone())
}

/// Keeps buckets sorted by time; a bucket at an existing time replaces its rate.
fn insert_return_bucket<M: ManagedTypeApi>(
    buckets: &mut ManagedVec<M, RexReturnBucket<M>>,
    time: u64,
    rate: BigUint<M>,
) {
    let mut sorted = ManagedVec::new();
    let mut pending = Some(RexReturnBucket { time, rate });
    for bucket in buckets.iter() {
        let bucket = bucket.clone();
        if let Some(new_bucket) = pending.take() {
            if new_bucket.time < bucket.time {
                sorted.push(new_bucket);
            } else if new_bucket.time == bucket.time {
                sorted.push(new_bucket);
                continue;
            } else {
                pending = Some(new_bucket);
            }
        }
        sorted.push(bucket);
    }
    if let Some(new_bucket) = pending {
        sorted.push(new_bucket);
    }

    *buckets = sorted;
}

/// A dated cohort of shares. The cohort at `END_OF_DAYS` is the savings bucket.
#[type_abi]
#[derive(
    ManagedVecItem, NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug,
)]
pub struct RexMaturity<M: ManagedTypeApi> {
    pub time: u64,
    pub amount: BigUint<M>,
}

/// Per-account share holding.
///
/// `matured_rex + sum(rex_maturities.amount) == rex_balance`; the savings
/// bucket, when present, is always the last entry.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexBalance<M: ManagedTypeApi> {
    pub vote_stake: BigUint<M>,
    pub rex_balance: BigUint<M>,
    pub matured_rex: BigUint<M>,
    pub rex_maturities: ManagedVec<M, RexMaturity<M>>,
}

impl<M: ManagedTypeApi> Default for RexBalance<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ManagedTypeApi> RexBalance<M> {
    pub fn new() -> Self {
        RexBalance {
            vote_stake: BigUint::zero(),
            rex_balance: BigUint::zero(),
            matured_rex: BigUint::zero(),
            rex_maturities: ManagedVec::new(),
        }
    }

    /// Moves every bucket due at `now` into `matured_rex`, oldest first.
    pub fn process_maturities(&mut self, now: u64) {
        while !self.rex_maturities.is_empty() {
            let front = self.rex_maturities.get(0).clone();
            if front.time > now {
                break;
            }

            self.matured_rex += &front.amount;
            self.rex_maturities.remove(0);
        }
    }

    /// Shares in savings, without detaching the bucket.
    pub fn savings(&self) -> BigUint<M> {
        match self.last_bucket() {
            Some(last) if last.time == END_OF_DAYS => last.amount,
            _ => BigUint::zero(),
        }
    }

    /// Detaches the savings bucket and returns its amount. Pair with [`Self::put_savings`].
    pub fn read_savings(&mut self) -> BigUint<M> {
        match self.last_bucket() {
            Some(last) if last.time == END_OF_DAYS => {
                self.rex_maturities.remove(self.rex_maturities.len() - 1);
                last.amount
            },
            _ => BigUint::zero(),
        }
    }

    pub fn put_savings(&mut self, rex: BigUint<M>) {
        if rex == 0u64 {
            return;
        }

        self.add_to_bucket(END_OF_DAYS, rex);
    }

    /// Adds `amount` to the newest bucket when it shares `maturity`, otherwise appends.
    pub fn add_to_bucket(&mut self, maturity: u64, amount: BigUint<M>) {
        if let Some(mut last) = self.last_bucket() {
            if last.time == maturity {
                last.amount += amount;
                let last_index = self.rex_maturities.len() - 1;
                // in bounds: the list is non-empty
                let _ = self.rex_maturities.set(last_index, last);
                return;
            }
        }

        self.rex_maturities.push(RexMaturity {
            time: maturity,
            amount,
        });
    }

    /// Records freshly bought shares in the `maturity` cohort, keeping savings last.
    pub fn add_purchase(&mut self, now: u64, maturity: u64, rex_received: &BigUint<M>) {
        self.rex_balance += rex_received;

        let rex_in_savings = self.read_savings();
        self.process_maturities(now);
        self.add_to_bucket(maturity, rex_received.clone());
        self.put_savings(rex_in_savings);
    }

    /// Takes `amount` out of the maturing cohorts, newest first, then out of
    /// `matured_rex`. Savings must already be detached. Returns what was moved.
    pub fn drain_for_savings(&mut self, amount: &BigUint<M>) -> BigUint<M> {
        let mut moved = BigUint::zero();
        while !self.rex_maturities.is_empty() && &moved < amount {
            let last_index = self.rex_maturities.len() - 1;
            let mut last = self.rex_maturities.get(last_index).clone();
            let wanted = amount - &moved;
            let taken = if wanted < last.amount {
                wanted
            } else {
                last.amount.clone()
            };

            last.amount -= &taken;
            moved += &taken;
            if last.amount == 0u64 {
                self.rex_maturities.remove(last_index);
            } else {
                // in bounds: checked non-empty by the loop condition
                let _ = self.rex_maturities.set(last_index, last);
            }
        }

        if &moved < amount {
            let rest = amount - &moved;
            if rest <= self.matured_rex {
                self.matured_rex -= &rest;
                moved += rest;
            }
        }

        moved
    }

    /// Folds `matured_rex` (minus what an open order needs) and every maturing
    /// cohort into a single cohort dated `maturity`. Savings are untouched.
    pub fn consolidate(&mut self, rex_in_sell_order: &BigUint<M>, maturity: u64) {
        let rex_in_savings = self.read_savings();

        let mut total = if self.matured_rex > *rex_in_sell_order {
            &self.matured_rex - rex_in_sell_order
        } else {
            BigUint::zero()
        };
        self.matured_rex = rex_in_sell_order.clone();
        for bucket in self.rex_maturities.iter() {
            total += &bucket.amount;
        }
        self.rex_maturities = ManagedVec::new();
        if total > 0u64 {
            self.rex_maturities.push(RexMaturity {
                time: maturity,
                amount: total,
            });
        }

        self.put_savings(rex_in_savings);
    }

    /// Burns `rex` sold shares, which must be matured.
    pub fn remove_sold(&mut self, rex: &BigUint<M>) {
        self.rex_balance -= rex;
        self.matured_rex -= rex;
    }

    fn last_bucket(&self) -> Option<RexMaturity<M>> {
        if self.rex_maturities.is_empty() {
            return None;
        }

        Some(self.rex_maturities.get(self.rex_maturities.len() - 1).clone())
    }
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexFund<M: ManagedTypeApi> {
    pub balance: BigUint<M>,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexLoan<M: ManagedTypeApi> {
    pub from: ManagedAddress<M>,
    pub receiver: ManagedAddress<M>,
    pub payment: BigUint<M>,
    pub balance: BigUint<M>,
    pub total_staked: BigUint<M>,
    pub loan_num: u64,
    pub expiration: u64,
}

/// Entry of the by-expiration loan index.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, Copy, PartialEq, Debug)]
pub struct LoanExpiry {
    pub expiration: u64,
    pub loan_num: u64,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexOrder<M: ManagedTypeApi> {
    pub owner: ManagedAddress<M>,
    pub rex_requested: BigUint<M>,
    pub is_open: bool,
    pub proceeds: BigUint<M>,
    pub stake_change: BigInt<M>,
    pub order_time: u64,
}

impl<M: ManagedTypeApi> RexOrder<M> {
    pub fn new(owner: ManagedAddress<M>, rex_requested: BigUint<M>, order_time: u64) -> Self {
        RexOrder {
            owner,
            rex_requested,
            is_open: true,
            proceeds: BigUint::zero(),
            stake_change: BigInt::zero(),
            order_time,
        }
    }

    /// Stages a fill; the owner collects it on their next order-touching call.
    pub fn close(&mut self, outcome: &RexOrderOutcome<M>) {
        self.proceeds = outcome.proceeds.clone();
        self.stake_change = outcome.stake_change.clone();
        self.is_open = false;
    }
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexOrderOutcome<M: ManagedTypeApi> {
    pub success: bool,
    pub proceeds: BigUint<M>,
    pub stake_change: BigInt<M>,
}

impl<M: ManagedTypeApi> RexOrderOutcome<M> {
    pub fn unfilled() -> Self {
        RexOrderOutcome {
            success: false,
            proceeds: BigUint::zero(),
            stake_change: BigInt::zero(),
        }
    }
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct RexMaturityConfig {
    pub num_of_maturity_buckets: u32,
    pub sell_matured_rex: bool,
    pub buy_rex_to_savings: bool,
}

impl Default for RexMaturityConfig {
    fn default() -> Self {
        RexMaturityConfig {
            num_of_maturity_buckets: DEFAULT_MATURITY_BUCKETS,
            sell_matured_rex: false,
            buy_rex_to_savings: false,
        }
    }
}

impl RexMaturityConfig {
    /// Midnight UTC of the current day plus `num_of_maturity_buckets` days.
    pub fn maturity_at(&self, now: u64) -> u64 {
        now - now % SECONDS_PER_DAY + u64::from(self.num_of_maturity_buckets) * SECONDS_PER_DAY
    }
}

/// Capacity granted to an account through loans.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Debug)]
pub struct ResourceTotals<M: ManagedTypeApi> {
    pub net_weight: BigUint<M>,
    pub cpu_weight: BigUint<M>,
}

impl<M: ManagedTypeApi> ResourceTotals<M> {
    pub fn is_empty(&self) -> bool {
        self.net_weight == 0u64 && self.cpu_weight == 0u64
    }
}
