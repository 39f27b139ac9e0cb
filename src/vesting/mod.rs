//! Vesting claims
//!
//! A claim locks an allocation of receipt tokens for one recipient. Rewards
//! up to a ceiling can be taken until the oracle clock passes the unlock
//! time, the principal only after it. An admin can claw the whole balance
//! back while the chain is still below the cancel height.

pub mod schedule;
pub mod store;

use crate::base::address::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("claim {0} already exists")]
    ClaimExists(u64),
    #[error("requested {requested} rewards, {available} available")]
    ExceedsRewardLimit { requested: u128, available: u128 },
    #[error("claim {0} has no rewards left")]
    NoRewardsAvailable(u64),
    #[error("oracle clock {clock} has not passed unlock time {unlock_time}")]
    BeforeUnlock { clock: u64, unlock_time: u64 },
    #[error("oracle clock {clock} is past unlock time {unlock_time}, rewards are closed")]
    AfterUnlock { clock: u64, unlock_time: u64 },
    #[error("requested {requested} principal, {available} vested")]
    ExceedsVestedLimit { requested: u128, available: u128 },
    #[error("cancel amount {amount} does not match balance {balance}")]
    WrongAmount { amount: u128, balance: u128 },
    #[error("height {height} is not below cancel height {min_cancel_height}")]
    TooLateToCancel { height: u64, min_cancel_height: u64 },
    #[error("claim {0} not found")]
    ClaimNotFound(u64),
    #[error("{caller} is not the recipient of claim {claim_id}")]
    NotRecipient { claim_id: u64, caller: Address },
    #[error("{0} is not a claim admin")]
    NotAdmin(Address),
    #[error("claim {0} is closed")]
    ClaimClosed(u64),
    #[error("claim amount must be positive")]
    ZeroAmount,
    #[error("claim arithmetic overflow")]
    ArithmeticOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Nothing redeemed yet
    Active,
    PartiallyRedeemed,
    /// Fully redeemed
    Closed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingClaim {
    pub claim_id: u64,
    pub recipient: Address,

    /// Original allocation
    pub principal_amount: u128,

    /// Receipt tokens still held by the claim
    pub reward_amount: u128,
    pub rewards_withdrawn: u128,
    pub created_at_height: u64,
    pub cancelled_at_height: Option<u64>,
}

impl VestingClaim {
    pub fn new(claim_id: u64, recipient: Address, amount: u128, height: u64) -> Self {
        Self {
            claim_id,
            recipient,
            principal_amount: amount,
            reward_amount: amount,
            rewards_withdrawn: 0,
            created_at_height: height,
            cancelled_at_height: None,
        }
    }

    pub fn balance(&self) -> u128 {
        self.reward_amount
    }

    /// Everything paid out of the claim so far
    pub fn redeemed(&self) -> u128 {
        self.principal_amount - self.reward_amount
    }

    pub fn status(&self) -> ClaimStatus {
        if self.cancelled_at_height.is_some() {
            ClaimStatus::Cancelled
        } else if self.reward_amount == 0 {
            ClaimStatus::Closed
        } else if self.reward_amount < self.principal_amount {
            ClaimStatus::PartiallyRedeemed
        } else {
            ClaimStatus::Active
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Admin funds a new claim
    Deposit,
    Rewards,
    Principal,
    /// Remaining balance returns to an admin
    Cancellation,
}

/// Receipt token movement an accepted claim operation settles with
///
/// `account` is debited for a [TransferKind::Deposit] and credited otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub claim_id: u64,
    pub kind: TransferKind,
    pub account: Address,
    pub amount: u128,
}
