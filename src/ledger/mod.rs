pub mod delegator;
pub mod memory;
pub mod plaintext;
pub mod snapshot;

use crate::ledger::plaintext::{Plaintext, PlaintextError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read access to the ledger, implemented by an RPC client outside this crate
pub trait LedgerReader {
    /// Public balance of `account` in microcredits
    fn read_balance(&self, account: &str) -> anyhow::Result<u64>;

    /// Raw plaintext stored under `key` in `program_id`'s `mapping`
    fn read_mapping(
        &self,
        key: &str,
        program_id: &str,
        mapping: &str,
    ) -> anyhow::Result<Option<String>>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("missing mapping value {program_id}/{mapping}[{key}]")]
    MissingMapping {
        program_id: String,
        mapping: String,
        key: String,
    },
    #[error("unknown protocol state {0}")]
    UnknownProtocolState(u8),
    #[error(transparent)]
    Plaintext(#[from] PlaintextError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolState {
    #[default]
    Normal,
    PrepRebalance,
    Rebalancing,
}

impl TryFrom<u8> for ProtocolState {
    type Error = LedgerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::PrepRebalance),
            2 => Ok(Self::Rebalancing),
            n => Err(LedgerError::UnknownProtocolState(n)),
        }
    }
}

impl From<ProtocolState> for u8 {
    fn from(value: ProtocolState) -> Self {
        match value {
            ProtocolState::Normal => 0,
            ProtocolState::PrepRebalance => 1,
            ProtocolState::Rebalancing => 2,
        }
    }
}

/// Core protocol balances as of one ledger snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolLedgerState {
    /// Stake the protocol last delegated, rewards are measured against it
    pub last_delegated_balance: u64,
    pub reserved_for_withdrawals: u64,
    /// Receipt tokens owed to the protocol but not yet minted
    pub owed_commission: u64,
    pub protocol_state: ProtocolState,
    pub minted_receipt_supply: u64,
    /// Public balance of the core protocol account
    pub protocol_account_balance: u64,
}

/// Reads and parses a required mapping value
pub(crate) fn read_plaintext<R: LedgerReader + ?Sized>(
    reader: &R,
    key: &str,
    program_id: &str,
    mapping: &str,
) -> anyhow::Result<Plaintext> {
    match read_optional_plaintext(reader, key, program_id, mapping)? {
        Some(value) => Ok(value),
        None => Err(LedgerError::MissingMapping {
            program_id: program_id.to_string(),
            mapping: mapping.to_string(),
            key: key.to_string(),
        }
        .into()),
    }
}

pub(crate) fn read_optional_plaintext<R: LedgerReader + ?Sized>(
    reader: &R,
    key: &str,
    program_id: &str,
    mapping: &str,
) -> anyhow::Result<Option<Plaintext>> {
    reader
        .read_mapping(key, program_id, mapping)?
        .map(|raw| Plaintext::parse(&raw).map_err(LedgerError::from))
        .transpose()
        .map_err(anyhow::Error::new)
}
