//! Scaled fixed-point primitives.
//!
//! Fee rates, prices and volatility are fixed-point numbers scaled by
//! [`PRECISION`] (`1e18`).  Token balances are normalised to the same
//! 18-decimal precision with per-token scaling factors before entering
//! the solvers.
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`scale_up`] | `amount · factor` |
//! | [`scale_down`] | `⌊amount / factor⌋` |
//! | [`mul_down`] / [`mul_up`] | `a · b / PRECISION`, floor / ceil |
//! | [`div_down`] / [`div_up`] | `a · PRECISION / b`, floor / ceil |
//!
//! Every operation fails with [`AmmError::Overflow`] if an intermediate
//! product leaves the 256-bit range, and with
//! [`AmmError::DivisionByZero`] on a zero divisor.

use primitive_types::U256;

use super::CheckedArithmetic;
use crate::domain::Rounding;
use crate::error::AmmError;

/// Fixed-point unit: `1.0 == PRECISION`.
pub const PRECISION: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Normalises a native amount to 18 decimals.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::math::scale_up;
///
/// // 1 USDC (6 decimals) normalised to 18 decimals.
/// let scaled = scale_up(U256::from(1_000_000u64), U256::exp10(12));
/// assert_eq!(scaled, Ok(U256::exp10(18)));
/// ```
pub fn scale_up(amount: U256, factor: U256) -> Result<U256, AmmError> {
    amount.safe_mul(factor, "scale_up overflow")
}

/// Converts an 18-decimal amount back to native precision, truncating.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `factor` is zero.
pub fn scale_down(amount: U256, factor: U256) -> Result<U256, AmmError> {
    amount.safe_div(factor)
}

/// `a · b / PRECISION`, rounded down.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if `a · b` exceeds 256 bits.
pub fn mul_down(a: U256, b: U256) -> Result<U256, AmmError> {
    let product = a.safe_mul(b, "mul_down overflow")?;
    Rounding::Down.divide(product, PRECISION)
}

/// `a · b / PRECISION`, rounded up.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if `a · b` exceeds 256 bits.
pub fn mul_up(a: U256, b: U256) -> Result<U256, AmmError> {
    let product = a.safe_mul(b, "mul_up overflow")?;
    Rounding::Up.divide(product, PRECISION)
}

/// `a · PRECISION / b`, rounded down.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `b` is zero.
/// - [`AmmError::Overflow`] if `a · PRECISION` exceeds 256 bits.
pub fn div_down(a: U256, b: U256) -> Result<U256, AmmError> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let scaled = a.safe_mul(PRECISION, "div_down overflow")?;
    Rounding::Down.divide(scaled, b)
}

/// `a · PRECISION / b`, rounded up.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `b` is zero.
/// - [`AmmError::Overflow`] if `a · PRECISION` exceeds 256 bits.
pub fn div_up(a: U256, b: U256) -> Result<U256, AmmError> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let scaled = a.safe_mul(PRECISION, "div_up overflow")?;
    Rounding::Up.divide(scaled, b)
}

/// Narrows a fixed-point value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `ctx` if `value` exceeds `u128`.
pub fn to_u128(value: U256, ctx: &'static str) -> Result<u128, AmmError> {
    u128::try_from(value).map_err(|_| AmmError::Overflow(ctx))
}
