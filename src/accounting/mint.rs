//! Mint and burn sizing
//!
//! Every incoming or outgoing amount rebases the receipt supply by the same
//! proportion it changes the stake. Rounding always lands on the side of
//! the holders who stay in the pool.

use super::{
    rates::{compute_rates, ExchangeRateSnapshot},
    AccountingError, Result,
};
use crate::{
    base::{amount::Amount, numeric::mul_div},
    constants::DEPOSIT_SLIPPAGE_BUFFER,
    ledger::snapshot::LedgerSnapshot,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Receipt tokens minted for depositing `amount` of stake
pub fn size_mint(total_stake: u64, total_receipt_supply: u64, amount: u64) -> Result<u64> {
    if total_stake == 0 {
        return Err(AccountingError::EmptyPool);
    }

    let stake_after = total_stake
        .checked_add(amount)
        .ok_or(AccountingError::ArithmeticOverflow)?;
    let new_total_receipt = mul_div(total_receipt_supply, stake_after, total_stake)
        .ok_or(AccountingError::ArithmeticOverflow)?;

    new_total_receipt
        .checked_sub(total_receipt_supply)
        .ok_or(AccountingError::ArithmeticOverflow)
}

/// Receipt tokens burned for withdrawing `amount` of stake
pub fn size_burn(total_stake: u64, total_receipt_supply: u64, amount: u64) -> Result<u64> {
    if total_stake == 0 {
        return Err(AccountingError::EmptyPool);
    }

    let stake_after = total_stake
        .checked_sub(amount)
        .ok_or(AccountingError::InsufficientStake {
            requested: amount,
            available: total_stake,
        })?;
    let new_total_receipt = mul_div(total_receipt_supply, stake_after, total_stake)
        .ok_or(AccountingError::ArithmeticOverflow)?;

    Ok(total_receipt_supply - new_total_receipt)
}

/// Stake redeemed by burning `receipt_amount`
pub fn size_withdrawal(
    total_stake: u64,
    total_receipt_supply: u64,
    receipt_amount: u64,
) -> Result<u64> {
    if total_receipt_supply == 0 {
        return Err(AccountingError::EmptyPool);
    }

    let stake_out = mul_div(receipt_amount, total_stake, total_receipt_supply)
        .ok_or(AccountingError::ArithmeticOverflow)?;
    if stake_out > total_stake {
        return Err(AccountingError::InsufficientStake {
            requested: stake_out,
            available: total_stake,
        });
    }

    Ok(stake_out)
}

/// Priced deposit against one ledger snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub deposit: u64,
    pub expected_mint: u64,
    /// Receipt tokens the accrued commission is worth
    pub commission_mint: u64,
    /// Rate the deposit was priced at, commission settled
    pub rate: ExchangeRateSnapshot,
}

impl DepositQuote {
    /// Minimum receipt tokens to accept on submission
    pub fn min_receipt_out(&self) -> u64 {
        self.expected_mint.saturating_sub(DEPOSIT_SLIPPAGE_BUFFER)
    }
}

/// Prices a deposit: accrue rewards, settle the commission, then size the
/// mint at the settled rate
pub fn size_deposit(snapshot: &LedgerSnapshot, deposit: u64) -> Result<DepositQuote> {
    let rates = compute_rates(&snapshot.state, &snapshot.delegators)?;
    let settlement = rates.settle_commission()?;
    let rate = settlement.rate;
    let expected_mint = size_mint(rate.total_stake, rate.total_receipt_supply, deposit)?;

    debug!(
        "Deposit of {} mints {expected_mint} at {rate}",
        Amount(deposit)
    );
    Ok(DepositQuote {
        deposit,
        expected_mint,
        commission_mint: settlement.commission_mint,
        rate,
    })
}

/// Checks a proposed deposit mutation against the snapshot, returning the
/// mint the snapshot supports
pub fn validate_deposit(
    snapshot: &LedgerSnapshot,
    deposit: u64,
    proposed_mint: u64,
) -> Result<u64> {
    let quote = size_deposit(snapshot, deposit)?;
    if proposed_mint > quote.expected_mint {
        warn!(
            "Rejecting deposit of {}: proposed mint {proposed_mint} exceeds {}",
            Amount(deposit),
            quote.expected_mint
        );
        return Err(AccountingError::ExcessiveMint {
            proposed: proposed_mint,
            expected: quote.expected_mint,
        });
    }

    Ok(quote.expected_mint)
}
