//! Threshold-signed time oracle
//!
//! A committee of keyholders agrees on the clock value that gates claim
//! redemptions. Every update carries a fresh request id and a quorum of
//! committee signatures over the request digest. Verification has no side
//! effects; the commitment only changes once every check has passed.

pub mod committee;
pub mod message;
pub mod signature;
pub mod tally;

use crate::{base::address::Address, clock::ChainTime};
use committee::Committee;
use log::{info, warn};
use message::{OpType, RequestDigest};
use serde::{Deserialize, Serialize};
use signature::{Ed25519Scheme, Signature, SignatureScheme};
use std::collections::BTreeSet;
use tally::Tally;
use thiserror::Error;

/// Authorization failures, fatal to the update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("invalid signature from {signer}")]
    InvalidSignature { signer: Address },
    #[error("{signer} is not a committee member")]
    UnauthorizedSigner { signer: Address },
    #[error("{signer} signed more than once")]
    DuplicateSigner { signer: Address },
    #[error("{signers} committee signatures, {quorum} required")]
    QuorumNotMet { signers: usize, quorum: usize },
    #[error("request {0} was already committed")]
    ReplayedRequest(u64),
    #[error("candidate {candidate} does not advance committed value {committed}")]
    StaleValue { candidate: u64, committed: u64 },
    #[error("oracle already initialized")]
    AlreadyInitialized,
    #[error("oracle not initialized")]
    NotInitialized,
    #[error("invalid committee: {0}")]
    InvalidCommittee(&'static str),
}

/// One update attempt, consumed by the call that presents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    pub request_id: u64,
    pub candidate_value: u64,
    pub signatures: Vec<(Signature, Address)>,
}

impl OracleRequest {
    pub fn new(request_id: u64, candidate_value: u64) -> Self {
        Self {
            request_id,
            candidate_value,
            signatures: vec![],
        }
    }

    pub fn digest(&self) -> RequestDigest {
        RequestDigest::new(OpType::UpdateTimestamp, self.candidate_value, self.request_id)
    }

    pub fn with_signature(mut self, signature: Signature, signer: Address) -> Self {
        self.signatures.push((signature, signer));
        self
    }
}

/// Last committed request and value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleCommitment {
    pub request_id: u64,
    pub value: u64,
}

#[derive(Debug, Clone)]
pub struct TimeOracle<S = Ed25519Scheme> {
    committee: Committee,
    scheme: S,
    commitment: Option<OracleCommitment>,
    consumed: BTreeSet<u64>,
}

impl TimeOracle<Ed25519Scheme> {
    /// Initialized ed25519 oracle
    pub fn genesis(committee: Committee, genesis_timestamp: u64) -> Self {
        let mut oracle = Self::new(committee, Ed25519Scheme);
        oracle.commit(OracleCommitment {
            request_id: 0,
            value: genesis_timestamp,
        });
        oracle
    }
}

impl<S: SignatureScheme> TimeOracle<S> {
    /// Uninitialized oracle, see [TimeOracle::initialize]
    pub fn new(committee: Committee, scheme: S) -> Self {
        Self {
            committee,
            scheme,
            commitment: None,
            consumed: BTreeSet::new(),
        }
    }

    /// Commits request 0 at the genesis timestamp, once
    pub fn initialize(&mut self, genesis_timestamp: u64) -> Result<OracleCommitment, OracleError> {
        if self.commitment.is_some() {
            return Err(OracleError::AlreadyInitialized);
        }

        let commitment = OracleCommitment {
            request_id: 0,
            value: genesis_timestamp,
        };
        self.commit(commitment);
        info!("Initialized time oracle at {genesis_timestamp}");
        Ok(commitment)
    }

    pub fn committee(&self) -> &Committee {
        &self.committee
    }

    pub fn commitment(&self) -> Option<OracleCommitment> {
        self.commitment
    }

    pub fn committed_clock(&self) -> Option<u64> {
        self.commitment.map(|c| c.value)
    }

    pub fn is_consumed(&self, request_id: u64) -> bool {
        self.consumed.contains(&request_id)
    }

    /// Runs every check an update must pass without touching state
    pub fn verify(&self, request: &OracleRequest) -> Result<Tally, OracleError> {
        let committed = self.commitment.ok_or(OracleError::NotInitialized)?;
        let digest = request.digest();
        let tally = Tally::collect(&self.committee, &self.scheme, &digest, &request.signatures)?;

        if self.is_consumed(request.request_id) {
            return Err(OracleError::ReplayedRequest(request.request_id));
        }

        if request.candidate_value <= committed.value {
            return Err(OracleError::StaleValue {
                candidate: request.candidate_value,
                committed: committed.value,
            });
        }

        Ok(tally)
    }

    /// Verifies and commits a timestamp update
    pub fn update_timestamp(
        &mut self,
        request: &OracleRequest,
    ) -> Result<OracleCommitment, OracleError> {
        let tally = self.verify(request).map_err(|err| {
            warn!("Rejected oracle request {}: {err}", request.request_id);
            err
        })?;

        let commitment = OracleCommitment {
            request_id: request.request_id,
            value: request.candidate_value,
        };
        self.commit(commitment);

        info!(
            "Committed oracle clock {} for request {} with {} of {} signatures",
            commitment.value,
            commitment.request_id,
            tally.count(),
            self.committee.len()
        );
        Ok(commitment)
    }

    fn commit(&mut self, commitment: OracleCommitment) {
        self.consumed.insert(commitment.request_id);
        self.commitment = Some(commitment);
    }

    /// Clock readings at `height` as seen by this oracle
    pub fn time_at(&self, height: u64) -> Result<ChainTime, OracleError> {
        Ok(ChainTime {
            height,
            oracle_clock: self.committed_clock().ok_or(OracleError::NotInitialized)?,
        })
    }
}
