use multiversx_sc::types::{TestAddress, TestSCAddress};
use multiversx_sc_scenario::imports::{MxscPath, TestTokenIdentifier};

pub const SECONDS_PER_DAY: u64 = 86_400; // 24 * 60 * 60
pub const LOAN_TERM: u64 = 30 * SECONDS_PER_DAY;

/// 2023-11-14T22:13:20Z, 36_800 seconds past a 12 hour boundary.
pub const START_TIME: u64 = 1_700_000_000;
pub const START_DAY: u64 = 1_699_920_000;
/// First 12 hour boundary after `START_TIME`; income queued at start opens here.
pub const FIRST_BUCKET_TIME: u64 = 1_700_006_400;
/// Maturity of shares bought on the start day with the default 5 buckets.
pub const FIRST_MATURITY: u64 = START_DAY + 5 * SECONDS_PER_DAY;

pub const INITIAL_BALANCE: u64 = 1_000_000_000_000;
pub const ONE_THOUSAND_TOKENS: u64 = 10_000_000; // 4 decimals
pub const HUNDRED_K_TOKENS: u64 = 1_000_000_000;
/// Shares minted for `HUNDRED_K_TOKENS` into a fresh pool.
pub const HUNDRED_K_SHARES: u64 = 10_000_000_000_000;

pub const CORE_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("CORE-abcdef");
pub const OTHER_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("OTHER-abcdef");

pub const REX_ADDRESS: TestSCAddress = TestSCAddress::new("rex-exchange");
pub const REX_PATH: MxscPath = MxscPath::new("output/rex_exchange.mxsc.json");

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const ALICE: TestAddress = TestAddress::new("alice");
pub const BOB: TestAddress = TestAddress::new("bob");
pub const CAROL: TestAddress = TestAddress::new("carol");
