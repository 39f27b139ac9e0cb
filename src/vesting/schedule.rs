//! Claim redemption policy
//!
//! The principal unlocks like a timed account: nothing before the cliff, the
//! cliff fraction once the oracle clock passes [VestingPolicy::unlock_time],
//! then one increment per elapsed vesting period until the whole principal
//! is free. Fractions are in basis points of the principal.

use super::ClaimError;
use crate::{base::numeric::mul_div_u128, constants::*};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct VestingSchedule {
    /// Principal unlocked at the cliff
    #[default(BPS_SCALE)]
    pub cliff_bps: u64,

    /// Seconds per vesting increment
    #[default(1)]
    pub vesting_period: u64,

    /// Principal unlocked per elapsed period
    #[default(0)]
    pub increment_bps: u64,
}

impl VestingSchedule {
    /// Principal unlocked `elapsed` seconds past the cliff
    pub fn unlocked_after(&self, principal: u128, elapsed: u64) -> Result<u128, ClaimError> {
        let cliff_amount = bps_of(principal, self.cliff_bps)?;
        let increment = bps_of(principal, self.increment_bps)?;
        let periods = match elapsed.checked_div(self.vesting_period) {
            Some(periods) => periods as u128,
            // zero period vests everything at the cliff
            None => return Ok(principal),
        };

        let locked = principal - cliff_amount;
        if increment == 0 {
            return Ok(cliff_amount);
        }
        if periods >= locked.div_ceil(increment) {
            return Ok(principal);
        }

        // below the full-vesting period count, so bounded by `locked`
        Ok(cliff_amount + increment * periods)
    }
}

fn bps_of(amount: u128, bps: u64) -> Result<u128, ClaimError> {
    let bps = bps.min(BPS_SCALE) as u128;
    mul_div_u128(amount, bps, BPS_SCALE as u128)
        .ok_or(ClaimError::ArithmeticOverflow)
}

/// Limits governing every claim in a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct VestingPolicy {
    /// Reward ceiling as a fraction of the principal
    #[default(REWARD_CEILING_NUMERATOR)]
    pub reward_ceiling_numerator: u128,

    #[default(REWARD_CEILING_DENOMINATOR)]
    pub reward_ceiling_denominator: u128,

    /// Oracle clock the principal cliff sits at
    #[default(UNLOCK_TIME)]
    pub unlock_time: u64,

    /// Claims can only be cancelled below this height
    #[default(MIN_CANCEL_HEIGHT)]
    pub min_cancel_height: u64,

    pub schedule: VestingSchedule,
}

impl VestingPolicy {
    /// Total rewards a claim may ever pay out
    pub fn reward_ceiling(&self, principal: u128) -> Result<u128, ClaimError> {
        // zero denominator disables rewards
        if self.reward_ceiling_denominator == 0 {
            return Ok(0);
        }

        mul_div_u128(
            principal,
            self.reward_ceiling_numerator,
            self.reward_ceiling_denominator,
        )
        .ok_or(ClaimError::ArithmeticOverflow)
    }

    pub fn is_unlocked(&self, oracle_clock: u64) -> bool {
        oracle_clock > self.unlock_time
    }

    /// Principal unlocked at `oracle_clock`
    pub fn unlocked(&self, principal: u128, oracle_clock: u64) -> Result<u128, ClaimError> {
        if !self.is_unlocked(oracle_clock) {
            return Ok(0);
        }

        self.schedule
            .unlocked_after(principal, oracle_clock - self.unlock_time)
    }

    pub fn can_cancel(&self, height: u64) -> bool {
        height < self.min_cancel_height
    }
}
