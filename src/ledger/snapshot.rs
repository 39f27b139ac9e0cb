//! Consistent view of everything the accounting engines read

use super::{
    delegator::DelegatorAccount, read_plaintext, LedgerReader, ProtocolLedgerState, ProtocolState,
};
use crate::{
    accounting::AccountingError,
    config::ProgramIds,
    constants::{
        BALANCES_MAPPING, DELEGATED_BALANCE_KEY, OWED_COMMISSION_KEY, OWED_COMMISSION_MAPPING,
        PROTOCOL_STATE_KEY, PROTOCOL_STATE_MAPPING, REGISTERED_TOKENS_MAPPING,
        RESERVED_FOR_WITHDRAWALS_KEY,
    },
};
use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub state: ProtocolLedgerState,
    pub delegators: Vec<DelegatorAccount>,
}

impl LedgerSnapshot {
    /// Assembles a snapshot from ledger reads
    pub fn read<R: LedgerReader + ?Sized>(
        reader: &R,
        programs: &ProgramIds,
    ) -> anyhow::Result<Self> {
        let delegators = programs
            .delegators
            .iter()
            .map(|account| {
                DelegatorAccount::read(reader, account)
                    .with_context(|| format!("reading delegator {account}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let core = programs.core_protocol.as_str();
        let last_delegated_balance =
            read_plaintext(reader, DELEGATED_BALANCE_KEY, core, BALANCES_MAPPING)?.as_u64()?;
        let reserved_for_withdrawals =
            read_plaintext(reader, RESERVED_FOR_WITHDRAWALS_KEY, core, BALANCES_MAPPING)?
                .as_u64()?;
        let protocol_state: ProtocolState =
            read_plaintext(reader, PROTOCOL_STATE_KEY, core, PROTOCOL_STATE_MAPPING)?
                .as_u8()?
                .try_into()?;
        let owed_commission =
            read_plaintext(reader, OWED_COMMISSION_KEY, core, OWED_COMMISSION_MAPPING)?
                .as_u64()?;
        let protocol_account_balance = reader.read_balance(core)?;

        let supply = read_plaintext(
            reader,
            &programs.receipt_token_id,
            &programs.token_registry,
            REGISTERED_TOKENS_MAPPING,
        )?
        .member("supply")?
        .as_u128()?;
        let minted_receipt_supply =
            u64::try_from(supply).map_err(|_| AccountingError::ArithmeticOverflow)?;

        let state = ProtocolLedgerState {
            last_delegated_balance,
            reserved_for_withdrawals,
            owed_commission,
            protocol_state,
            minted_receipt_supply,
            protocol_account_balance,
        };
        debug!("Read ledger snapshot {state:?}");

        Ok(Self { state, delegators })
    }

    /// Loads a snapshot saved as JSON
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_slice(&contents)
            .with_context(|| format!("parsing snapshot {}", path.display()))
    }
}
