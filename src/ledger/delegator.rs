//! Delegator sub-accounts holding protocol stake

use super::{read_optional_plaintext, LedgerReader};
use crate::constants::{BONDED_MAPPING, CREDITS_PROGRAM, UNBONDING_MAPPING};
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorAccount {
    pub liquid_balance: u64,
    pub bonded_microcredits: u64,
    pub unbonding_microcredits: u64,
}

impl DelegatorAccount {
    /// Reads the delegator's public balance and its bonded and unbonding
    /// entries in the credits program. Absent entries hold nothing.
    pub fn read<R: LedgerReader + ?Sized>(reader: &R, account: &str) -> anyhow::Result<Self> {
        let liquid_balance = reader.read_balance(account)?;
        let bonded_microcredits =
            read_optional_plaintext(reader, account, CREDITS_PROGRAM, BONDED_MAPPING)?
                .map(|bonded| bonded.member("microcredits")?.as_u64())
                .transpose()?
                .unwrap_or_default();
        let unbonding_microcredits =
            read_optional_plaintext(reader, account, CREDITS_PROGRAM, UNBONDING_MAPPING)?
                .map(|unbonding| unbonding.member("microcredits")?.as_u64())
                .transpose()?
                .unwrap_or_default();

        trace!(
            "delegator {account}: liquid {liquid_balance}, bonded {bonded_microcredits}, unbonding {unbonding_microcredits}"
        );
        Ok(Self {
            liquid_balance,
            bonded_microcredits,
            unbonding_microcredits,
        })
    }

    /// Liquid, bonded, and unbonding stake together, `None` on overflow
    pub fn total(&self) -> Option<u64> {
        self.liquid_balance
            .checked_add(self.bonded_microcredits)?
            .checked_add(self.unbonding_microcredits)
    }
}
