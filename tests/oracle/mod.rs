use crate::helpers::*;
use pondo_core::{
    clock::TimeSource,
    oracle::{
        signature::{Ed25519Scheme, Keyholder},
        OracleCommitment, OracleError, TimeOracle,
    },
};
use pretty_assertions::assert_eq;

const GENESIS: u64 = 1_700_000_000;

fn oracle() -> anyhow::Result<(Vec<Keyholder>, TimeOracle)> {
    let keyholders = keyholders(3);
    let oracle = TimeOracle::genesis(committee(&keyholders, 2)?, GENESIS);
    Ok((keyholders, oracle))
}

#[test]
fn quorum_commits_once() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;
    let request = signed_request(1, GENESIS + 60, &[&k[0], &k[2]]);

    assert_eq!(
        oracle.update_timestamp(&request)?,
        OracleCommitment {
            request_id: 1,
            value: GENESIS + 60
        }
    );
    assert_eq!(oracle.committed_clock(), Some(GENESIS + 60));
    assert_eq!(oracle.time_at(9)?.committed_oracle_clock(), GENESIS + 60);

    // identical resubmission
    assert_eq!(
        oracle.update_timestamp(&request),
        Err(OracleError::ReplayedRequest(1))
    );

    // a later value still cannot reuse the id
    assert_eq!(
        oracle.update_timestamp(&signed_request(1, GENESIS + 120, &[&k[0], &k[1]])),
        Err(OracleError::ReplayedRequest(1))
    );
    assert_eq!(oracle.committed_clock(), Some(GENESIS + 60));
    Ok(())
}

#[test]
fn one_signature_short() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;

    assert_eq!(
        oracle.update_timestamp(&signed_request(1, GENESIS + 1, &[&k[1]])),
        Err(OracleError::QuorumNotMet {
            signers: 1,
            quorum: 2
        })
    );
    assert_eq!(oracle.committed_clock(), Some(GENESIS));
    assert!(!oracle.is_consumed(1));
    Ok(())
}

#[test]
fn duplicate_signer() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;

    assert_eq!(
        oracle.update_timestamp(&signed_request(1, GENESIS + 1, &[&k[1], &k[1]])),
        Err(OracleError::DuplicateSigner {
            signer: k[1].address()
        })
    );
    Ok(())
}

#[test]
fn outsider_signer() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;
    let outsider = Keyholder::from_seed([42; 32]);

    assert_eq!(
        oracle.update_timestamp(&signed_request(1, GENESIS + 1, &[&k[0], &outsider])),
        Err(OracleError::UnauthorizedSigner {
            signer: outsider.address()
        })
    );
    Ok(())
}

#[test]
fn tampered_requests() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;
    let request = signed_request(1, GENESIS + 1, &[&k[0], &k[1]]);

    let mut wrong_value = request.clone();
    wrong_value.candidate_value += 1;
    assert_eq!(
        oracle.update_timestamp(&wrong_value),
        Err(OracleError::InvalidSignature {
            signer: k[0].address()
        })
    );

    let mut wrong_id = request.clone();
    wrong_id.request_id = 2;
    assert_eq!(
        oracle.update_timestamp(&wrong_id),
        Err(OracleError::InvalidSignature {
            signer: k[0].address()
        })
    );

    let mut corrupted = request.clone();
    corrupted.signatures[1].0 .0[10] ^= 0xff;
    assert_eq!(
        oracle.update_timestamp(&corrupted),
        Err(OracleError::InvalidSignature {
            signer: k[1].address()
        })
    );

    // untouched request still goes through
    oracle.update_timestamp(&request)?;
    Ok(())
}

#[test]
fn clock_only_moves_forward() -> anyhow::Result<()> {
    let (k, mut oracle) = oracle()?;
    oracle.update_timestamp(&signed_request(1, GENESIS + 10, &[&k[0], &k[1]]))?;

    assert_eq!(
        oracle.update_timestamp(&signed_request(2, GENESIS + 5, &[&k[0], &k[1]])),
        Err(OracleError::StaleValue {
            candidate: GENESIS + 5,
            committed: GENESIS + 10
        })
    );

    // ids need not be sequential
    oracle.update_timestamp(&signed_request(7, GENESIS + 11, &[&k[1], &k[2]]))?;
    oracle.update_timestamp(&signed_request(3, GENESIS + 12, &[&k[2], &k[0]]))?;
    assert_eq!(oracle.committed_clock(), Some(GENESIS + 12));
    Ok(())
}

#[test]
fn uninitialized_oracle() -> anyhow::Result<()> {
    let k = keyholders(3);
    let mut oracle = TimeOracle::new(committee(&k, 3)?, Ed25519Scheme);
    let request = signed_request(1, 10, &[&k[0], &k[1], &k[2]]);

    assert_eq!(
        oracle.update_timestamp(&request),
        Err(OracleError::NotInitialized)
    );
    oracle.initialize(0)?;
    assert_eq!(oracle.initialize(5), Err(OracleError::AlreadyInitialized));
    oracle.update_timestamp(&request)?;
    assert_eq!(oracle.committed_clock(), Some(10));
    Ok(())
}

#[test]
fn request_json() -> anyhow::Result<()> {
    let k = keyholders(2);
    let request = signed_request(4, 99, &[&k[0], &k[1]]);
    let json = serde_json::to_string(&request)?;

    assert_eq!(serde_json::from_str::<pondo_core::oracle::OracleRequest>(&json)?, request);
    Ok(())
}
