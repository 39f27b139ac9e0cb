//! Crate-wide error

use crate::{
    accounting::AccountingError, base::address::AddressError, ledger::LedgerError,
    oracle::OracleError, vesting::ClaimError,
};
use thiserror::Error;

/// Any rejected state transition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error(transparent)]
    Accounting(#[from] AccountingError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Claim(#[from] ClaimError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Address(#[from] AddressError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
