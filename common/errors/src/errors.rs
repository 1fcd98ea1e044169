#![no_std]

pub static ERROR_MUST_USE_CORE_TOKEN: &[u8] = b"must use core token";

pub static ERROR_MUST_DEPOSIT_POSITIVE_AMOUNT: &[u8] = b"must deposit a positive amount";

pub static ERROR_MUST_WITHDRAW_POSITIVE_AMOUNT: &[u8] = b"must withdraw a positive amount";

pub static ERROR_MUST_USE_POSITIVE_AMOUNT: &[u8] = b"must use positive amount";

pub static ERROR_MUST_USE_POSITIVE_ASSET_AMOUNT: &[u8] = b"must use positive asset amount";

pub static ERROR_POSITIVE_TRANSFER_FROM_FUND: &[u8] =
    b"must transfer positive amount from REX fund";

pub static ERROR_POSITIVE_TRANSFER_TO_FUND: &[u8] = b"must transfer positive amount to REX fund";

pub static ERROR_DEPOSIT_TO_FUND_FIRST: &[u8] = b"must deposit to REX fund first";

pub static ERROR_INSUFFICIENT_FUNDS: &[u8] = b"insufficient funds";

pub static ERROR_REX_NOT_INITIALIZED: &[u8] = b"rex system not initialized yet";

pub static ERROR_REX_SYSTEM_NOT_INITIALIZED: &[u8] = b"rex system is not initialized";

pub static ERROR_LENDABLE_POOL_EMPTY: &[u8] = b"lendable REX pool is empty";

pub static ERROR_USER_MUST_FIRST_BUY_REX: &[u8] = b"user must first buyrex";

pub static ERROR_POSITIVE_REX_AMOUNT: &[u8] = b"asset must be a positive amount of REX";

pub static ERROR_INSUFFICIENT_AVAILABLE_REX: &[u8] = b"insufficient available rex";

pub static ERROR_PROCEEDS_NEGLIGIBLE: &[u8] = b"proceeds are negligible";

pub static ERROR_INSUFFICIENT_FUNDS_FOR_ORDERS: &[u8] =
    b"insufficient funds for current and scheduled orders";

pub static ERROR_NO_SELL_ORDER_SCHEDULED: &[u8] = b"no sellrex order is scheduled";

pub static ERROR_SELL_ORDER_FILLED: &[u8] =
    b"sellrex order has been filled and cannot be canceled";

pub static ERROR_LOANS_NOT_AVAILABLE: &[u8] = b"rex loans are currently not available";

pub static ERROR_LOAN_PRICE_NOT_FAVORABLE: &[u8] = b"loan price does not favor renting";

pub static ERROR_LOAN_NOT_FOUND: &[u8] = b"loan not found";

pub static ERROR_NOT_LOAN_CREATOR: &[u8] = b"user must be loan creator";

pub static ERROR_LOAN_EXPIRED: &[u8] = b"loan has already expired";

pub static ERROR_INSUFFICIENT_LOAN_BALANCE: &[u8] = b"insufficent loan balance";

pub static ERROR_NO_REX_BALANCE: &[u8] = b"account has no REX balance";

pub static ERROR_INSUFFICIENT_REX_BALANCE: &[u8] = b"insufficient REX balance";

pub static ERROR_INSUFFICIENT_REX_IN_SAVINGS: &[u8] = b"insufficient REX in savings";

pub static ERROR_REMAINING_REX_BALANCE: &[u8] =
    b"account has remaining REX balance, must sell first";

pub static ERROR_QUANTITY_MUST_BE_POSITIVE: &[u8] = b"quantity must be positive";

pub static ERROR_BALANCE_MUST_BE_POSITIVE: &[u8] =
    b"balance must be set to have a positive amount";

pub static ERROR_MATURITY_BUCKETS_POSITIVE: &[u8] = b"num_of_maturity_buckets must be positive";

pub static ERROR_MATURITY_BUCKETS_TOO_HIGH: &[u8] =
    b"num_of_maturity_buckets must be less than or equal to 30";

pub static ERROR_INSUFFICIENT_RESERVES: &[u8] = b"insufficient reserves";

pub static ERROR_INSUFFICIENT_NET_BANDWIDTH: &[u8] = b"insufficient staked total net bandwidth";

pub static ERROR_INSUFFICIENT_CPU_BANDWIDTH: &[u8] = b"insufficient staked total cpu bandwidth";

pub static ERROR_UNLENT_NEGATIVE: &[u8] = b"programmer error, this should never go negative";

pub static ERROR_TOTAL_LENT_NEGATIVE: &[u8] = b"programmer error, total_lent would go negative";

pub static ERROR_MOVE_TO_SAVINGS_MISMATCH: &[u8] = b"programmer error in mvtosavings";

pub static ERROR_MOVE_TO_SAVINGS_LOGIC: &[u8] = b"logic error in mvtosavings";

pub static ERROR_SHARE_COUNT_MISMATCH: &[u8] = b"programmer error, resultant share count mismatch";

pub static ERROR_MUST_DEPOSIT_CORE_TOKEN: &[u8] = b"must deposit core token";

pub static ERROR_INVALID_CORE_TOKEN: &[u8] = b"invalid core token";
