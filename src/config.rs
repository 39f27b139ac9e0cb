//! Protocol configuration

use crate::{
    base::address::Address,
    constants::*,
    oracle::committee::Committee,
    vesting::schedule::VestingPolicy,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;

/// Where the protocol's state lives on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ProgramIds {
    #[default(CORE_PROTOCOL_PROGRAM.to_string())]
    pub core_protocol: String,

    #[default(TOKEN_REGISTRY_PROGRAM.to_string())]
    pub token_registry: String,

    #[default(RECEIPT_TOKEN_ID.to_string())]
    pub receipt_token_id: String,

    #[default(TIME_ORACLE_PROGRAM.to_string())]
    pub time_oracle: String,

    #[default(TOKEN_DISBURSEMENT_PROGRAM.to_string())]
    pub token_disbursement: String,

    /// Delegator accounts in slot order
    #[default(_code = "default_delegators()")]
    pub delegators: Vec<String>,
}

fn default_delegators() -> Vec<String> {
    (1..=DELEGATOR_COUNT)
        .map(|n| format!("{DELEGATOR_PROGRAM_PREFIX}{n}.aleo"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct OracleConfig {
    pub committee: Vec<Address>,

    #[default(ORACLE_QUORUM)]
    pub quorum: usize,

    #[default(ORACLE_GENESIS_TIMESTAMP)]
    pub genesis_timestamp: u64,
}

impl OracleConfig {
    pub fn committee(&self) -> anyhow::Result<Committee> {
        Committee::new(self.committee.clone(), self.quorum).context("oracle committee")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ProtocolConfig {
    pub programs: ProgramIds,
    pub oracle: OracleConfig,
    pub vesting: VestingPolicy,

    /// Keyholders allowed to create and cancel claims
    pub claim_admins: Vec<Address>,
}

impl ProtocolConfig {
    /// Reads a JSON config, absent fields take their defaults
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_slice(&contents)
            .with_context(|| format!("parsing config {}", path.display()))
    }
}
