//! Exchange-rate engine and commission accrual

use super::{mint::size_mint, AccountingError, Result};
use crate::{
    base::{amount::Amount, numeric::mul_div},
    constants::{COMMISSION_DENOMINATOR, COMMISSION_NUMERATOR},
    ledger::{delegator::DelegatorAccount, ProtocolLedgerState, ProtocolState},
};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rewards observed since the last delegation, split between the protocol
/// and receipt-token holders
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionAccrual {
    pub earned_rewards: u64,
    pub earned_commission: u64,
    pub non_commissioned_rewards: u64,
}

impl CommissionAccrual {
    /// A stake total below the last delegated balance (slashing) earns nothing
    pub fn accrue(total_protocol_stake: u64, last_delegated_balance: u64) -> Result<Self> {
        let earned_rewards = total_protocol_stake.saturating_sub(last_delegated_balance);
        let earned_commission = mul_div(
            earned_rewards,
            COMMISSION_NUMERATOR,
            COMMISSION_DENOMINATOR,
        )
        .ok_or(AccountingError::ArithmeticOverflow)?;

        Ok(Self {
            earned_rewards,
            earned_commission,
            non_commissioned_rewards: earned_rewards - earned_commission,
        })
    }
}

/// Stake backing the receipt token against the receipt supply, derived
/// fresh for every accounting call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateSnapshot {
    pub total_stake: u64,
    pub total_receipt_supply: u64,
    pub accrual: CommissionAccrual,
}

/// Rate after the accrued commission has been priced into receipt tokens
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSettlement {
    pub commission_mint: u64,
    pub rate: ExchangeRateSnapshot,
}

impl ExchangeRateSnapshot {
    /// Prices the earned commission at the post-accrual rate, as if the
    /// protocol deposited it
    pub fn settle_commission(&self) -> Result<CommissionSettlement> {
        let commission = self.accrual.earned_commission;
        let commission_mint = size_mint(self.total_stake, self.total_receipt_supply, commission)?;
        let rate = Self {
            total_stake: self
                .total_stake
                .checked_add(commission)
                .ok_or(AccountingError::ArithmeticOverflow)?,
            total_receipt_supply: self
                .total_receipt_supply
                .checked_add(commission_mint)
                .ok_or(AccountingError::ArithmeticOverflow)?,
            accrual: self.accrual,
        };

        debug!(
            "Settled commission {} for {commission_mint} receipt tokens",
            Amount(commission)
        );
        Ok(CommissionSettlement {
            commission_mint,
            rate,
        })
    }

    /// Receipt tokens per microcredit of stake
    pub fn receipt_per_stake(&self) -> Option<Decimal> {
        (self.total_stake > 0)
            .then(|| Decimal::from(self.total_receipt_supply) / Decimal::from(self.total_stake))
    }
}

impl std::fmt::Display for ExchangeRateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.receipt_per_stake() {
            Some(ratio) => write!(
                f,
                "{} receipt / {} stake ({} receipt per stake)",
                Amount(self.total_receipt_supply),
                Amount(self.total_stake),
                ratio.round_dp(9).normalize()
            ),
            None => write!(f, "empty pool"),
        }
    }
}

/// Total stake held across the delegator accounts
pub fn total_protocol_stake(delegators: &[DelegatorAccount]) -> Result<u64> {
    delegators.iter().try_fold(0u64, |total, delegator| {
        delegator
            .total()
            .and_then(|stake| total.checked_add(stake))
            .ok_or(AccountingError::ArithmeticOverflow)
    })
}

/// Current stake-to-receipt rate for a ledger snapshot
pub fn compute_rates(
    ledger: &ProtocolLedgerState,
    delegators: &[DelegatorAccount],
) -> Result<ExchangeRateSnapshot> {
    let total_protocol_stake = total_protocol_stake(delegators)?;
    let accrual = CommissionAccrual::accrue(total_protocol_stake, ledger.last_delegated_balance)?;

    let deposit_pool = deposit_pool(ledger)?;
    let total_stake = ledger
        .last_delegated_balance
        .checked_add(deposit_pool)
        .and_then(|stake| stake.checked_add(accrual.non_commissioned_rewards))
        .ok_or(AccountingError::ArithmeticOverflow)?;
    let total_receipt_supply = ledger
        .minted_receipt_supply
        .checked_add(ledger.owed_commission)
        .ok_or(AccountingError::ArithmeticOverflow)?;

    debug!(
        "Protocol stake {}, rewards {}, commission {}, deposit pool {}",
        Amount(total_protocol_stake),
        Amount(accrual.earned_rewards),
        Amount(accrual.earned_commission),
        Amount(deposit_pool),
    );
    Ok(ExchangeRateSnapshot {
        total_stake,
        total_receipt_supply,
        accrual,
    })
}

/// Deposits held by the core account that are neither delegated nor
/// reserved for withdrawals. While rebalancing the delegated stake sits in
/// the core account too.
fn deposit_pool(ledger: &ProtocolLedgerState) -> Result<u64> {
    let balance = ledger.protocol_account_balance;
    let pool = match ledger.protocol_state {
        ProtocolState::Rebalancing => balance
            .checked_sub(ledger.last_delegated_balance)
            .and_then(|rest| rest.checked_sub(ledger.reserved_for_withdrawals)),
        ProtocolState::Normal | ProtocolState::PrepRebalance => {
            balance.checked_sub(ledger.reserved_for_withdrawals)
        }
    };

    pool.ok_or(AccountingError::InvariantViolation(
        "protocol account balance below its commitments",
    ))
}
