//! Oracle committee

use super::OracleError;
use crate::base::address::Address;
use serde::{Deserialize, Serialize};

/// Fixed set of keyholders and the number of them that must sign an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommitteeSerde")]
pub struct Committee {
    members: Vec<Address>,
    quorum: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct CommitteeSerde {
    members: Vec<Address>,
    quorum: usize,
}

impl TryFrom<CommitteeSerde> for Committee {
    type Error = OracleError;

    fn try_from(value: CommitteeSerde) -> Result<Self, Self::Error> {
        Self::new(value.members, value.quorum)
    }
}

impl Committee {
    /// Members are tracked in a 64-bit signer mask
    pub const MAX_MEMBERS: usize = 64;

    pub fn new(members: Vec<Address>, quorum: usize) -> Result<Self, OracleError> {
        if members.is_empty() {
            return Err(OracleError::InvalidCommittee("no members"));
        }

        if members.len() > Self::MAX_MEMBERS {
            return Err(OracleError::InvalidCommittee("too many members"));
        }

        if quorum == 0 {
            return Err(OracleError::InvalidCommittee("quorum must be at least 1"));
        }

        if quorum > members.len() {
            return Err(OracleError::InvalidCommittee("quorum exceeds committee size"));
        }

        for (n, member) in members.iter().enumerate() {
            if members[..n].contains(member) {
                return Err(OracleError::InvalidCommittee("duplicate member"));
            }
        }

        Ok(Self { members, quorum })
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }

    pub fn members(&self) -> &[Address] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of `address` in the committee, if a member
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.members.iter().position(|member| member == address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.index_of(address).is_some()
    }
}
