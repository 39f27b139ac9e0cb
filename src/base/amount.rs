//! Microcredit amount type

use crate::constants::{CREDITS_DECIMALS, CREDITS_SCALE};
use anyhow::anyhow;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default, Hash, Serialize, Deserialize,
)]
pub struct Amount(pub u64);

//////////
// impl //
//////////

impl Amount {
    pub fn to_decimal(self) -> Decimal {
        let mut decimal = Decimal::from(self.0);
        decimal.set_scale(CREDITS_DECIMALS).ok();
        decimal
    }
}

/////////////////
// conversions //
/////////////////

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl std::str::FromStr for Amount {
    type Err = anyhow::Error;

    /// Parses a credits amount, e.g. `1.5` is 1_500_000 microcredits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let credits = s.parse::<Decimal>().map_err(|e| anyhow!("{e}"))?;
        if credits.is_sign_negative() {
            return Err(anyhow!("negative amount: {s}"));
        }

        (credits * Decimal::from(CREDITS_SCALE))
            .trunc()
            .to_u64()
            .map(Self)
            .ok_or_else(|| anyhow!("amount out of range: {s}"))
    }
}

/////////////
// display //
/////////////

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Amount {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(u64::arbitrary(g))
    }
}
