//! Claim store
//!
//! Claims live in a dense vector indexed by claim id. Ids are never reused,
//! a cancelled or fully redeemed claim keeps its slot.

use super::{
    schedule::VestingPolicy, ClaimError, ClaimStatus, Transfer, TransferKind, VestingClaim,
};
use crate::{base::address::Address, clock::TimeSource};
use log::{info, warn};
use std::collections::HashMap;

pub type Result<T> = std::result::Result<T, ClaimError>;

#[derive(Debug, Clone, Default)]
pub struct ClaimStore {
    policy: VestingPolicy,
    admins: Vec<Address>,
    index: HashMap<u64, usize>,
    claims: Vec<VestingClaim>,
}

impl ClaimStore {
    pub fn new(policy: VestingPolicy, admins: Vec<Address>) -> Self {
        Self {
            policy,
            admins,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> &VestingPolicy {
        &self.policy
    }

    pub fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    pub fn get(&self, claim_id: u64) -> Option<&VestingClaim> {
        self.index.get(&claim_id).map(|&n| &self.claims[n])
    }

    pub fn status(&self, claim_id: u64) -> Option<ClaimStatus> {
        self.get(claim_id).map(VestingClaim::status)
    }

    pub fn claims(&self) -> impl Iterator<Item = &VestingClaim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Rewards the recipient can still take
    pub fn reward_headroom(&self, claim_id: u64) -> Result<u128> {
        let claim = self.get(claim_id).ok_or(ClaimError::ClaimNotFound(claim_id))?;
        self.rewards_available(claim)
    }

    /// Principal the recipient can take at `time`
    pub fn vested_headroom(&self, claim_id: u64, time: impl TimeSource) -> Result<u128> {
        let claim = self.get(claim_id).ok_or(ClaimError::ClaimNotFound(claim_id))?;
        self.principal_available(claim, time.committed_oracle_clock())
    }

    /// Locks `amount` for `recipient` under a fresh claim id
    pub fn create(
        &mut self,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        recipient: Address,
        time: impl TimeSource,
    ) -> Result<Transfer> {
        self.require_admin(caller)?;
        if amount == 0 {
            return Err(ClaimError::ZeroAmount);
        }
        if self.index.contains_key(&claim_id) {
            return Err(ClaimError::ClaimExists(claim_id));
        }

        let height = time.current_height();
        self.index.insert(claim_id, self.claims.len());
        self.claims
            .push(VestingClaim::new(claim_id, recipient, amount, height));

        info!("Created claim {claim_id} for {amount} at height {height}");
        Ok(Transfer {
            claim_id,
            kind: TransferKind::Deposit,
            account: caller.clone(),
            amount,
        })
    }

    /// Pays rewards out of the balance, only while the principal is locked
    pub fn withdraw_rewards(
        &mut self,
        caller: &Address,
        claim_id: u64,
        requested: u128,
        time: impl TimeSource,
    ) -> Result<Transfer> {
        let n = self.recipient_slot(caller, claim_id)?;
        let clock = time.committed_oracle_clock();

        if self.policy.is_unlocked(clock) {
            return Err(ClaimError::AfterUnlock {
                clock,
                unlock_time: self.policy.unlock_time,
            });
        }

        let available = self.rewards_available(&self.claims[n])?;

        if available == 0 {
            return Err(ClaimError::NoRewardsAvailable(claim_id));
        }
        if requested > available {
            warn!("Claim {claim_id} rewards request {requested} exceeds {available}");
            return Err(ClaimError::ExceedsRewardLimit {
                requested,
                available,
            });
        }

        let claim = &mut self.claims[n];
        claim.reward_amount -= requested;
        claim.rewards_withdrawn += requested;

        info!("Claim {claim_id} paid {requested} rewards");
        Ok(Transfer {
            claim_id,
            kind: TransferKind::Rewards,
            account: claim.recipient.clone(),
            amount: requested,
        })
    }

    pub fn withdraw_principal(
        &mut self,
        caller: &Address,
        claim_id: u64,
        requested: u128,
        time: impl TimeSource,
    ) -> Result<Transfer> {
        let n = self.recipient_slot(caller, claim_id)?;
        let clock = time.committed_oracle_clock();

        if !self.policy.is_unlocked(clock) {
            return Err(ClaimError::BeforeUnlock {
                clock,
                unlock_time: self.policy.unlock_time,
            });
        }

        let available = self.principal_available(&self.claims[n], clock)?;
        if requested > available {
            warn!("Claim {claim_id} principal request {requested} exceeds {available}");
            return Err(ClaimError::ExceedsVestedLimit {
                requested,
                available,
            });
        }

        let claim = &mut self.claims[n];
        claim.reward_amount -= requested;

        info!("Claim {claim_id} paid {requested} principal at clock {clock}");
        Ok(Transfer {
            claim_id,
            kind: TransferKind::Principal,
            account: claim.recipient.clone(),
            amount: requested,
        })
    }

    /// Returns the whole remaining balance to the cancelling admin
    pub fn cancel(
        &mut self,
        caller: &Address,
        claim_id: u64,
        amount: u128,
        time: impl TimeSource,
    ) -> Result<Transfer> {
        self.require_admin(caller)?;
        let n = *self
            .index
            .get(&claim_id)
            .ok_or(ClaimError::ClaimNotFound(claim_id))?;

        let height = time.current_height();
        if !self.policy.can_cancel(height) {
            return Err(ClaimError::TooLateToCancel {
                height,
                min_cancel_height: self.policy.min_cancel_height,
            });
        }

        let claim = &mut self.claims[n];
        if matches!(claim.status(), ClaimStatus::Closed | ClaimStatus::Cancelled) {
            return Err(ClaimError::ClaimClosed(claim_id));
        }
        if amount != claim.reward_amount {
            return Err(ClaimError::WrongAmount {
                amount,
                balance: claim.reward_amount,
            });
        }

        claim.reward_amount = 0;
        claim.cancelled_at_height = Some(height);

        info!("Cancelled claim {claim_id} at height {height}, {amount} returned to {caller}");
        Ok(Transfer {
            claim_id,
            kind: TransferKind::Cancellation,
            account: caller.clone(),
            amount,
        })
    }

    fn require_admin(&self, caller: &Address) -> Result<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(ClaimError::NotAdmin(caller.clone()))
        }
    }

    /// Slot of a live claim `caller` receives
    fn recipient_slot(&self, caller: &Address, claim_id: u64) -> Result<usize> {
        let n = *self
            .index
            .get(&claim_id)
            .ok_or(ClaimError::ClaimNotFound(claim_id))?;
        let claim = &self.claims[n];

        if &claim.recipient != caller {
            return Err(ClaimError::NotRecipient {
                claim_id,
                caller: caller.clone(),
            });
        }
        if claim.status() == ClaimStatus::Cancelled {
            return Err(ClaimError::ClaimClosed(claim_id));
        }

        Ok(n)
    }

    fn rewards_available(&self, claim: &VestingClaim) -> Result<u128> {
        let ceiling = self.policy.reward_ceiling(claim.principal_amount)?;
        Ok(ceiling
            .saturating_sub(claim.rewards_withdrawn)
            .min(claim.reward_amount))
    }

    fn principal_available(&self, claim: &VestingClaim, clock: u64) -> Result<u128> {
        let unlocked = self.policy.unlocked(claim.principal_amount, clock)?;
        Ok(unlocked
            .saturating_sub(claim.redeemed())
            .min(claim.reward_amount))
    }
}
