//! Chain time as seen by a single call

use serde::{Deserialize, Serialize};

/// Read-only view of the chain height and the oracle's committed clock
pub trait TimeSource {
    fn current_height(&self) -> u64;

    /// Last value committed by the time oracle
    fn committed_oracle_clock(&self) -> u64;
}

/// Fixed reading, one per evaluated call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTime {
    pub height: u64,
    pub oracle_clock: u64,
}

impl ChainTime {
    pub fn new(height: u64, oracle_clock: u64) -> Self {
        Self {
            height,
            oracle_clock,
        }
    }
}

impl TimeSource for ChainTime {
    fn current_height(&self) -> u64 {
        self.height
    }

    fn committed_oracle_clock(&self) -> u64 {
        self.oracle_clock
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_height(&self) -> u64 {
        (**self).current_height()
    }

    fn committed_oracle_clock(&self) -> u64 {
        (**self).committed_oracle_clock()
    }
}
