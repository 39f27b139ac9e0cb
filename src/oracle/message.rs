//! Signed request messages
//!
//! Committee members sign `H(H(value) || op_type || request_id)`, binding the
//! value, the operation, and the request together. `H` is 256-bit BLAKE2b
//! and integers are little-endian.

use blake2::{digest::consts::U32, Blake2b, Digest};
use serde::{Deserialize, Serialize};

type Blake2b256 = Blake2b<U32>;

/// Operations the committee signs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OpType {
    UpdateTimestamp = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestDigest(pub [u8; 32]);

impl RequestDigest {
    pub fn new(op_type: OpType, value: u64, request_id: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(hash_value(value));
        hasher.update([op_type as u8]);
        hasher.update(request_id.to_le_bytes());

        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

pub fn hash_value(value: u64) -> [u8; 32] {
    Blake2b256::digest(value.to_le_bytes()).into()
}

impl std::fmt::Display for RequestDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
