#![no_std]

/// Shares minted per core-token unit when the pool is (re)seeded.
pub const REX_RATIO: u64 = 10_000;

/// Virtual rent reserve seeded on the first deposit (20,000.0000 core tokens at 4 decimals).
/// Renting is unprofitable until more than this amount sits unlent in the pool.
pub const INIT_TOTAL_RENT: u64 = 200_000_000;

pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Every loan runs for 30 days before it is renewed or closed.
pub const LOAN_TERM_SECONDS: u64 = 30 * SECONDS_PER_DAY;

/// Width of one return-pool distribution step (10 minutes).
pub const DIST_INTERVAL_SECONDS: u64 = 600;
/// Number of distribution steps a return bucket is amortized over (30 days).
pub const TOTAL_INTERVALS: u64 = 30 * 144;
/// Pending income is turned into a return bucket on 12 hour boundaries.
pub const HOURS_PER_BUCKET: u64 = 12;

/// A tenth of the lent capital always stays unavailable for redemptions.
pub const UNLENT_RESERVE_DIVISOR: u64 = 10;

pub const DEFAULT_MATURITY_BUCKETS: u32 = 5;
pub const MAX_MATURITY_BUCKETS: u32 = 30;

/// Work units spent by the implicit maintenance pass of every user action.
pub const DEFAULT_MAINTENANCE_BUDGET: u16 = 2;

/// Maturity key of the savings bucket, it never matures.
pub const END_OF_DAYS: u64 = u64::MAX;
