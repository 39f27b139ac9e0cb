use crate::helpers::*;
use pondo_core::{
    accounting::{
        mint::{size_deposit, size_mint, validate_deposit},
        rates::compute_rates,
        AccountingError,
    },
    config::ProgramIds,
    constants::DEPOSIT_SLIPPAGE_BUFFER,
    ledger::{memory::InMemoryLedger, snapshot::LedgerSnapshot, LedgerError, ProtocolState},
    submit::{DepositPlanner, Mutation, RecordingSink},
};
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn snapshot_from_ledger_reads() -> anyhow::Result<()> {
    let programs = ProgramIds::default();
    let snapshot = rewarded_snapshot();
    let ledger = ledger(&snapshot, &programs);

    assert_eq!(LedgerSnapshot::read(&ledger, &programs)?, snapshot);
    assert_eq!(LedgerSnapshot::from_path(Path::new(SNAPSHOT_PATH))?, snapshot);
    Ok(())
}

#[test]
fn missing_core_mapping() {
    let programs = ProgramIds::default();
    let ledger = InMemoryLedger::new();

    let err = LedgerSnapshot::read(&ledger, &programs).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::MissingMapping {
            program_id: programs.core_protocol.clone(),
            mapping: "balances".into(),
            key: "0u8".into(),
        })
    );
}

#[test]
fn unknown_protocol_state() {
    let programs = ProgramIds::default();
    let mut ledger = ledger(&Default::default(), &programs);
    ledger.set_mapping(&programs.core_protocol, "protocol_state", "0u8", "7u8".into());

    let err = LedgerSnapshot::read(&ledger, &programs).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::UnknownProtocolState(7))
    );
}

#[test]
fn rewarded_rates() -> anyhow::Result<()> {
    let snapshot = rewarded_snapshot();
    let rates = compute_rates(&snapshot.state, &snapshot.delegators)?;

    assert_eq!(rates.accrual.earned_rewards, 10_000_000);
    assert_eq!(rates.accrual.earned_commission, 1_000_000);
    assert_eq!(rates.total_stake, 1_014_000_000);
    assert_eq!(rates.total_receipt_supply, 1_000_000_000);

    let settled = rates.settle_commission()?;
    assert_eq!(settled.commission_mint, 986_193);
    assert_eq!(settled.rate.total_stake, 1_015_000_000);
    assert_eq!(settled.rate.total_receipt_supply, 1_000_986_193);
    Ok(())
}

#[test]
fn quote_and_validate_deposit() -> anyhow::Result<()> {
    let snapshot = rewarded_snapshot();
    let quote = size_deposit(&snapshot, 500_000_000)?;

    assert_eq!(quote.expected_mint, 493_096_646);
    assert_eq!(quote.commission_mint, 986_193);
    assert_eq!(
        quote.min_receipt_out(),
        493_096_646 - DEPOSIT_SLIPPAGE_BUFFER
    );

    assert_eq!(validate_deposit(&snapshot, 500_000_000, quote.min_receipt_out()), Ok(493_096_646));
    assert_eq!(
        validate_deposit(&snapshot, 500_000_000, 493_096_647),
        Err(AccountingError::ExcessiveMint {
            proposed: 493_096_647,
            expected: 493_096_646
        })
    );
    Ok(())
}

#[test]
fn rebalancing_excludes_delegated_balance() -> anyhow::Result<()> {
    let mut snapshot = rewarded_snapshot();
    snapshot.state.protocol_state = ProtocolState::Rebalancing;

    // the core account cannot hold less than what it delegated
    assert_eq!(
        compute_rates(&snapshot.state, &snapshot.delegators),
        Err(AccountingError::InvariantViolation(
            "protocol account balance below its commitments"
        ))
    );

    snapshot.state.protocol_account_balance = 1_005_000_000;
    let rates = compute_rates(&snapshot.state, &snapshot.delegators)?;
    assert_eq!(rates.total_stake, 1_014_000_000);
    Ok(())
}

#[test]
fn empty_pool_deposit() {
    let snapshot = LedgerSnapshot::default();

    assert_eq!(
        size_deposit(&snapshot, 1_000_000),
        Err(AccountingError::EmptyPool)
    );
    assert_eq!(size_mint(0, 0, 1), Err(AccountingError::EmptyPool));
}

#[test]
fn plan_and_submit_deposit() -> anyhow::Result<()> {
    let programs = ProgramIds::default();
    let ledger = ledger(&rewarded_snapshot(), &programs);
    let planner = DepositPlanner::new(&ledger, &programs);
    let mut sink = RecordingSink::default();

    assert!(planner
        .submit(&mut sink, 1_000_000, Some("referrer.aleo".into()))?
        .is_accepted());
    assert_eq!(
        sink.submitted,
        vec![Mutation::DepositPublicAsSigner {
            deposit: 1_000_000,
            min_receipt_out: 986_193 - DEPOSIT_SLIPPAGE_BUFFER,
            referrer: Some("referrer.aleo".into()),
        }]
    );
    Ok(())
}
