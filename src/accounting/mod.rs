//! Exchange-rate and mint accounting for the receipt token

pub mod mint;
pub mod rates;

use thiserror::Error;

/// Numeric precondition violations, always fatal to the call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountingError {
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("empty pool, seed the first deposit 1:1")]
    EmptyPool,
    #[error("ledger invariant violated: {0}")]
    InvariantViolation(&'static str),
    #[error("withdrawal of {requested} exceeds pool stake {available}")]
    InsufficientStake { requested: u64, available: u64 },
    #[error("proposed mint {proposed} exceeds {expected}")]
    ExcessiveMint { proposed: u64, expected: u64 },
}

pub type Result<T> = std::result::Result<T, AccountingError>;
