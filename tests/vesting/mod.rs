use crate::helpers::*;
use pondo_core::{
    clock::ChainTime,
    constants::{MIN_CANCEL_HEIGHT, UNLOCK_TIME},
    oracle::TimeOracle,
    vesting::{
        schedule::{VestingPolicy, VestingSchedule},
        store::ClaimStore,
        ClaimError, ClaimStatus, Transfer, TransferKind,
    },
};
use pretty_assertions::assert_eq;

#[test]
fn claim_lifecycle() -> anyhow::Result<()> {
    let k = keyholders(5);
    let (admin, recipient) = (k[3].address(), k[4].address());
    let mut oracle = TimeOracle::genesis(committee(&k[..3], 2)?, UNLOCK_TIME - 100);
    let mut store = ClaimStore::new(VestingPolicy::default(), vec![admin.clone()]);
    let height = 1_000;

    store.create(&admin, 3, 1_000_000_000, recipient.clone(), oracle.time_at(height)?)?;
    assert_eq!(
        store.withdraw_rewards(&recipient, 3, 500_000_000, oracle.time_at(height)?)?,
        Transfer {
            claim_id: 3,
            kind: TransferKind::Rewards,
            account: recipient.clone(),
            amount: 500_000_000,
        }
    );
    assert_eq!(store.reward_headroom(3)?, 0);
    assert_eq!(
        store.withdraw_rewards(&recipient, 3, 1, oracle.time_at(height)?),
        Err(ClaimError::NoRewardsAvailable(3))
    );
    assert_eq!(
        store.withdraw_principal(&recipient, 3, 0, oracle.time_at(height)?),
        Err(ClaimError::BeforeUnlock {
            clock: UNLOCK_TIME - 100,
            unlock_time: UNLOCK_TIME
        })
    );

    // reaching the unlock time exactly is not enough
    oracle.update_timestamp(&signed_request(1, UNLOCK_TIME, &[&k[0], &k[1]]))?;
    assert!(matches!(
        store.withdraw_principal(&recipient, 3, 0, oracle.time_at(height)?),
        Err(ClaimError::BeforeUnlock { .. })
    ));

    oracle.update_timestamp(&signed_request(2, UNLOCK_TIME + 1, &[&k[1], &k[2]]))?;
    let now = oracle.time_at(height + 10)?;
    store.withdraw_principal(&recipient, 3, 500_000_000, now)?;
    assert_eq!(
        store.withdraw_principal(&recipient, 3, 1, now),
        Err(ClaimError::ExceedsVestedLimit {
            requested: 1,
            available: 0
        })
    );

    assert_eq!(
        store.withdraw_rewards(&recipient, 3, 1, now),
        Err(ClaimError::AfterUnlock {
            clock: UNLOCK_TIME + 1,
            unlock_time: UNLOCK_TIME
        })
    );

    let claim = store.get(3).cloned().expect("claim 3");
    assert_eq!(claim.principal_amount, 1_000_000_000);
    assert_eq!(claim.reward_amount, 0);
    assert_eq!(claim.rewards_withdrawn, 500_000_000);
    assert_eq!(claim.created_at_height, height);
    assert_eq!(claim.status(), ClaimStatus::Closed);
    Ok(())
}

#[test]
fn rewards_close_at_unlock() -> anyhow::Result<()> {
    let k = keyholders(5);
    let (admin, recipient) = (k[3].address(), k[4].address());
    let mut oracle = TimeOracle::genesis(committee(&k[..3], 2)?, UNLOCK_TIME - 1);
    let mut store = ClaimStore::new(VestingPolicy::default(), vec![admin.clone()]);

    store.create(&admin, 5, 1_000, recipient.clone(), oracle.time_at(10)?)?;
    store.withdraw_rewards(&recipient, 5, 100, oracle.time_at(10)?)?;

    // the unlock time itself still pays rewards
    oracle.update_timestamp(&signed_request(1, UNLOCK_TIME, &[&k[0], &k[2]]))?;
    store.withdraw_rewards(&recipient, 5, 100, oracle.time_at(11)?)?;

    oracle.update_timestamp(&signed_request(2, UNLOCK_TIME + 1, &[&k[0], &k[1]]))?;
    assert_eq!(store.reward_headroom(5)?, 300);
    assert_eq!(
        store.withdraw_rewards(&recipient, 5, 1, oracle.time_at(12)?),
        Err(ClaimError::AfterUnlock {
            clock: UNLOCK_TIME + 1,
            unlock_time: UNLOCK_TIME
        })
    );
    assert_eq!(store.get(5).map(|claim| claim.rewards_withdrawn), Some(200));
    assert_eq!(store.vested_headroom(5, oracle.time_at(12)?)?, 800);
    Ok(())
}

#[test]
fn cancel_returns_balance_to_admin() -> anyhow::Result<()> {
    let k = keyholders(3);
    let (admin, other_admin, recipient) = (k[0].address(), k[1].address(), k[2].address());
    let mut store = ClaimStore::new(
        VestingPolicy::default(),
        vec![admin.clone(), other_admin.clone()],
    );
    let time = ChainTime::new(MIN_CANCEL_HEIGHT - 1, 0);

    store.create(&admin, 27, 2_000_000_000, recipient.clone(), time)?;
    assert_eq!(
        store.cancel(&other_admin, 27, 2_000_000_001, time),
        Err(ClaimError::WrongAmount {
            amount: 2_000_000_001,
            balance: 2_000_000_000
        })
    );
    assert_eq!(
        store.cancel(&other_admin, 27, 2_000_000_000, time)?,
        Transfer {
            claim_id: 27,
            kind: TransferKind::Cancellation,
            account: other_admin,
            amount: 2_000_000_000,
        }
    );
    assert_eq!(store.get(27).map(|claim| claim.balance()), Some(0));
    assert_eq!(store.status(27), Some(ClaimStatus::Cancelled));
    assert_eq!(
        store.withdraw_principal(&recipient, 27, 0, ChainTime::new(0, u64::MAX)),
        Err(ClaimError::ClaimClosed(27))
    );
    Ok(())
}

#[test]
fn cancel_window_closes() -> anyhow::Result<()> {
    let k = keyholders(2);
    let (admin, recipient) = (k[0].address(), k[1].address());
    let mut store = ClaimStore::new(VestingPolicy::default(), vec![admin.clone()]);

    store.create(&admin, 1, 10, recipient, ChainTime::default())?;
    assert_eq!(
        store.cancel(&admin, 1, 10, ChainTime::new(MIN_CANCEL_HEIGHT + 1, 0)),
        Err(ClaimError::TooLateToCancel {
            height: MIN_CANCEL_HEIGHT + 1,
            min_cancel_height: MIN_CANCEL_HEIGHT
        })
    );
    assert_eq!(store.status(1), Some(ClaimStatus::Active));
    Ok(())
}

#[test]
fn graded_principal_release() -> anyhow::Result<()> {
    let k = keyholders(2);
    let (admin, recipient) = (k[0].address(), k[1].address());
    let policy = VestingPolicy {
        unlock_time: 1_000,
        schedule: VestingSchedule {
            cliff_bps: 5_000,
            vesting_period: 100,
            increment_bps: 1_000,
        },
        ..Default::default()
    };
    let mut store = ClaimStore::new(policy, vec![admin.clone()]);
    store.create(&admin, 9, 10_000, recipient.clone(), ChainTime::default())?;

    // rewards taken while locked count against the vested principal
    store.withdraw_rewards(&recipient, 9, 2_500, ChainTime::default())?;
    assert_eq!(store.vested_headroom(9, ChainTime::new(0, 1_001))?, 2_500);
    store.withdraw_principal(&recipient, 9, 2_500, ChainTime::new(0, 1_001))?;
    assert_eq!(
        store.withdraw_principal(&recipient, 9, 1, ChainTime::new(0, 1_099)),
        Err(ClaimError::ExceedsVestedLimit {
            requested: 1,
            available: 0
        })
    );
    assert_eq!(store.vested_headroom(9, ChainTime::new(0, 1_300))?, 3_000);
    assert_eq!(store.vested_headroom(9, ChainTime::new(0, 10_000))?, 5_000);
    Ok(())
}
