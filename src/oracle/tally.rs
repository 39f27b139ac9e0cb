//! Threshold tally
//!
//! Each presented `(signature, signer)` pair is classified on its own, then
//! folded into a [Tally] that tracks which committee seats have signed.

use super::{
    committee::Committee,
    message::RequestDigest,
    signature::{Signature, SignatureScheme},
    OracleError,
};
use crate::base::address::Address;

/// Verdict on one presented pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerCheck {
    /// Valid signature from the committee member in seat `index`
    Verified { index: usize },
    Invalid { signer: Address },
    Unauthorized { signer: Address },
    Duplicate { signer: Address },
}

/// Committee seats that produced a verified signature
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    seats: u64,
}

impl Tally {
    pub fn count(&self) -> usize {
        self.seats.count_ones() as usize
    }

    pub fn has_signed(&self, index: usize) -> bool {
        index < Committee::MAX_MEMBERS && self.seats & (1 << index) != 0
    }

    /// Classifies a pair against the seats already counted
    pub fn check<S: SignatureScheme + ?Sized>(
        &self,
        committee: &Committee,
        scheme: &S,
        digest: &RequestDigest,
        signature: &Signature,
        signer: &Address,
    ) -> SignerCheck {
        if !scheme.verify(digest.as_bytes(), signature, signer) {
            return SignerCheck::Invalid {
                signer: signer.clone(),
            };
        }

        match committee.index_of(signer) {
            None => SignerCheck::Unauthorized {
                signer: signer.clone(),
            },
            Some(index) if self.has_signed(index) => SignerCheck::Duplicate {
                signer: signer.clone(),
            },
            Some(index) => SignerCheck::Verified { index },
        }
    }

    /// Counts a verified seat, any other verdict fails the whole request
    pub fn record(self, check: SignerCheck) -> Result<Self, OracleError> {
        match check {
            SignerCheck::Verified { index } => Ok(Self {
                seats: self.seats | (1 << index),
            }),
            SignerCheck::Invalid { signer } => Err(OracleError::InvalidSignature { signer }),
            SignerCheck::Unauthorized { signer } => {
                Err(OracleError::UnauthorizedSigner { signer })
            }
            SignerCheck::Duplicate { signer } => Err(OracleError::DuplicateSigner { signer }),
        }
    }

    /// Tallies every pair, then requires the committee quorum
    pub fn collect<S: SignatureScheme + ?Sized>(
        committee: &Committee,
        scheme: &S,
        digest: &RequestDigest,
        signatures: &[(Signature, Address)],
    ) -> Result<Self, OracleError> {
        let tally = signatures
            .iter()
            .try_fold(Self::default(), |tally, (signature, signer)| {
                let check = tally.check(committee, scheme, digest, signature, signer);
                tally.record(check)
            })?;

        if tally.count() < committee.quorum() {
            return Err(OracleError::QuorumNotMet {
                signers: tally.count(),
                quorum: committee.quorum(),
            });
        }

        Ok(tally)
    }
}
