//! In-memory ledger
//!
//! Stands in for the RPC-backed reader in tooling and tests.

use super::{snapshot::LedgerSnapshot, LedgerReader};
use crate::{
    config::ProgramIds,
    constants::{
        BALANCES_MAPPING, BONDED_MAPPING, CREDITS_PROGRAM, DELEGATED_BALANCE_KEY,
        OWED_COMMISSION_KEY, OWED_COMMISSION_MAPPING, PROTOCOL_STATE_KEY,
        PROTOCOL_STATE_MAPPING, REGISTERED_TOKENS_MAPPING, RESERVED_FOR_WITHDRAWALS_KEY,
        UNBONDING_MAPPING,
    },
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    balances: HashMap<String, u64>,
    mappings: HashMap<(String, String, String), String>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&mut self, account: &str, balance: u64) {
        self.balances.insert(account.to_string(), balance);
    }

    pub fn set_mapping(&mut self, program_id: &str, mapping: &str, key: &str, value: String) {
        self.mappings.insert(
            (program_id.to_string(), mapping.to_string(), key.to_string()),
            value,
        );
    }

    /// Writes every value [LedgerSnapshot::read] looks up
    pub fn from_snapshot(snapshot: &LedgerSnapshot, programs: &ProgramIds) -> Self {
        let mut ledger = Self::new();
        let state = &snapshot.state;
        let core = programs.core_protocol.as_str();

        for (account, delegator) in programs.delegators.iter().zip(&snapshot.delegators) {
            ledger.set_balance(account, delegator.liquid_balance);
            if delegator.bonded_microcredits > 0 {
                ledger.set_mapping(
                    CREDITS_PROGRAM,
                    BONDED_MAPPING,
                    account,
                    format!(
                        "{{ validator: {account}, microcredits: {}u64 }}",
                        delegator.bonded_microcredits
                    ),
                );
            }
            if delegator.unbonding_microcredits > 0 {
                ledger.set_mapping(
                    CREDITS_PROGRAM,
                    UNBONDING_MAPPING,
                    account,
                    format!(
                        "{{ microcredits: {}u64, height: 0u32 }}",
                        delegator.unbonding_microcredits
                    ),
                );
            }
        }

        ledger.set_balance(core, state.protocol_account_balance);
        ledger.set_mapping(
            core,
            BALANCES_MAPPING,
            DELEGATED_BALANCE_KEY,
            format!("{}u64", state.last_delegated_balance),
        );
        ledger.set_mapping(
            core,
            BALANCES_MAPPING,
            RESERVED_FOR_WITHDRAWALS_KEY,
            format!("{}u64", state.reserved_for_withdrawals),
        );
        ledger.set_mapping(
            core,
            PROTOCOL_STATE_MAPPING,
            PROTOCOL_STATE_KEY,
            format!("{}u8", u8::from(state.protocol_state)),
        );
        ledger.set_mapping(
            core,
            OWED_COMMISSION_MAPPING,
            OWED_COMMISSION_KEY,
            format!("{}u64", state.owed_commission),
        );
        ledger.set_mapping(
            &programs.token_registry,
            REGISTERED_TOKENS_MAPPING,
            &programs.receipt_token_id,
            format!(
                "{{ token_id: {}, supply: {}u128, decimals: 6u8 }}",
                programs.receipt_token_id, state.minted_receipt_supply
            ),
        );

        ledger
    }
}

impl LedgerReader for InMemoryLedger {
    fn read_balance(&self, account: &str) -> anyhow::Result<u64> {
        Ok(self.balances.get(account).copied().unwrap_or_default())
    }

    fn read_mapping(
        &self,
        key: &str,
        program_id: &str,
        mapping: &str,
    ) -> anyhow::Result<Option<String>> {
        Ok(self
            .mappings
            .get(&(program_id.to_string(), mapping.to_string(), key.to_string()))
            .cloned())
    }
}
