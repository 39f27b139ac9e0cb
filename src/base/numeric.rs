//! Widened integer helpers
//!
//! Products are taken in `u128` so only the final quotient has to fit the
//! narrower type.

/// `a * b / c` truncated toward zero, `None` if `c == 0` or the quotient
/// exceeds `u64`
pub fn mul_div(a: u64, b: u64, c: u64) -> Option<u64> {
    if c == 0 {
        return None;
    }

    let quotient = (a as u128) * (b as u128) / (c as u128);
    u64::try_from(quotient).ok()
}

/// `a * b / c` over `u128` truncated toward zero, `None` if `c == 0` or the
/// quotient exceeds `u128`
///
/// Splits `a` into `q * c + r` so the full product is never formed. Only
/// `r * b` must fit, which holds whenever `b` and `c` are ratio terms.
pub fn mul_div_u128(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }

    let whole = (a / c).checked_mul(b)?;
    let part = (a % c).checked_mul(b)? / c;
    whole.checked_add(part)
}
