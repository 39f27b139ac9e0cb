// version

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// credits constants

/// Microcredits per credit
pub const CREDITS_SCALE: u64 = 1_000_000;
pub const CREDITS_DECIMALS: u32 = 6;

// accounting constants

/// Protocol commission on earned rewards, as a fraction of
/// [COMMISSION_DENOMINATOR]
pub const COMMISSION_NUMERATOR: u64 = 1_000;
pub const COMMISSION_DENOMINATOR: u64 = 10_000;

/// Receipt tokens subtracted from a deposit quote to absorb rewards earned
/// between quoting and execution
pub const DEPOSIT_SLIPPAGE_BUFFER: u64 = 1_000;

/// Number of delegator programs holding protocol stake
pub const DELEGATOR_COUNT: usize = 5;

// program ids

pub const CREDITS_PROGRAM: &str = "credits.aleo";
pub const CORE_PROTOCOL_PROGRAM: &str = "pondo_protocol.aleo";
pub const TOKEN_REGISTRY_PROGRAM: &str = "token_registry.aleo";
pub const TIME_ORACLE_PROGRAM: &str = "time_oracle.aleo";
pub const TOKEN_DISBURSEMENT_PROGRAM: &str = "token_disbursement.aleo";
pub const DELEGATOR_PROGRAM_PREFIX: &str = "pondo_delegator";
/// Default receipt token id, deployments override it in the config
pub const RECEIPT_TOKEN_ID: &str = "1field";

// core protocol mapping keys

pub const BALANCES_MAPPING: &str = "balances";
pub const PROTOCOL_STATE_MAPPING: &str = "protocol_state";
pub const OWED_COMMISSION_MAPPING: &str = "owed_commission";
pub const REGISTERED_TOKENS_MAPPING: &str = "registered_tokens";
pub const BONDED_MAPPING: &str = "bonded";
pub const UNBONDING_MAPPING: &str = "unbonding";

pub const DELEGATED_BALANCE_KEY: &str = "0u8";
pub const RESERVED_FOR_WITHDRAWALS_KEY: &str = "2u8";
pub const PROTOCOL_STATE_KEY: &str = "0u8";
pub const OWED_COMMISSION_KEY: &str = "0u8";

// oracle constants

/// Distinct committee signatures required to commit an update
pub const ORACLE_QUORUM: usize = 2;
/// Committed clock value before the first update
pub const ORACLE_GENESIS_TIMESTAMP: u64 = 0;

// vesting constants

/// One year after genesis, in unix seconds
pub const UNLOCK_TIME: u64 = 1_757_015_686;
/// Claims can be cancelled strictly below this block height
pub const MIN_CANCEL_HEIGHT: u64 = 22_500_000;
pub const REWARD_CEILING_NUMERATOR: u128 = 1;
pub const REWARD_CEILING_DENOMINATOR: u128 = 2;

/// Basis points in a whole
pub const BPS_SCALE: u64 = 10_000;

// address constants

/// bs58check version byte of an [crate::base::address::Address]
pub const ADDRESS_VERSION: u8 = 0x1c;
