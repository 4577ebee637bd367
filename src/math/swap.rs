//! Output-balance solver for the two-asset StableSwap curve.
//!
//! Given the new balance `x` of the input asset and the invariant `D`,
//! the balance `y` of the output asset solves
//!
//! ```text
//! y² + (b − D)·y = c
//! c = D³ · A_P / (4 · x · Ann)
//! b = x + D · A_P / Ann
//! ```
//!
//! which Newton's method iterates as `y ← (y² + c) / (2y + b − D)`.

use primitive_types::U256;

use super::checked::abs_diff;
use super::invariant::{calculate_invariant, validate_amplification, A_PRECISION, MAX_ITERATIONS};
use super::CheckedArithmetic;
use crate::error::AmmError;

const N: u64 = 2;

/// Validates a pair of asset indices for a two-asset pool.
///
/// # Errors
///
/// - [`AmmError::InvalidTokenIndex`] if either index is above 1.
/// - [`AmmError::SameTokenIndices`] if both indices are equal.
pub const fn check_indices(from: usize, to: usize) -> Result<(), AmmError> {
    if from > 1 || to > 1 {
        return Err(AmmError::InvalidTokenIndex);
    }
    if from == to {
        return Err(AmmError::SameTokenIndices);
    }
    Ok(())
}

/// Amount of asset `to` released when `amount_in` of asset `from` is
/// added, all values normalised to 18 decimals.
///
/// The invariant is taken from the current `balances`; the new balance of
/// `to` is then solved with [`solve_y`] and the difference returned.
///
/// # Errors
///
/// - [`AmmError::InvalidTokenIndex`] / [`AmmError::SameTokenIndices`] for
///   bad indices.
/// - [`AmmError::OutputExceedsBalance`] if the solved balance is above the
///   current balance of `to`.
/// - Any solver error from [`calculate_invariant`] or [`solve_y`].
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::math::get_y;
///
/// let unit = U256::exp10(18);
/// let balances = [unit * U256::from(1_000_000u64), unit * U256::from(1_000_000u64)];
/// let out = get_y(0, 1, unit * U256::from(1_000u64), &balances, 20_000).expect("ok");
/// assert!(out < unit * U256::from(1_000u64));
/// assert!(out > unit * U256::from(999u64));
/// ```
pub fn get_y(
    from: usize,
    to: usize,
    amount_in: U256,
    balances: &[U256; 2],
    amplification: u128,
) -> Result<U256, AmmError> {
    check_indices(from, to)?;
    let d = calculate_invariant(balances, amplification)?;
    let x = balances[from].safe_add(amount_in, "y: input balance overflow")?;
    let y = solve_y(x, d, amplification)?;
    balances[to]
        .checked_sub(y)
        .ok_or(AmmError::OutputExceedsBalance)
}

/// Solves the output-side balance `y` for input-side balance `x` and
/// invariant `d`.
///
/// Starts from `y = D` and stops once `|Δy| <= 1`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmplification`] if `amplification ∉ (0, MAX_A]`.
/// - [`AmmError::Overflow`] on 256-bit overflow.
/// - [`AmmError::DidNotConverge`] after [`MAX_ITERATIONS`] steps.
pub fn solve_y(x: U256, d: U256, amplification: u128) -> Result<U256, AmmError> {
    validate_amplification(amplification)?;

    let n = U256::from(N);
    let a_precision = U256::from(A_PRECISION);
    let ann = U256::from(amplification).safe_mul(n, "y: Ann overflow")?;

    let c = if x.is_zero() {
        U256::zero()
    } else {
        d.safe_mul(d, "y: c overflow")?
            .safe_div(x.safe_mul(n, "y: 2x overflow")?)?
            .safe_mul(d, "y: c overflow")?
            .safe_mul(a_precision, "y: c overflow")?
            .safe_div(ann.safe_mul(n, "y: Ann·n overflow")?)?
    };
    let b = x.safe_add(
        d.safe_mul(a_precision, "y: b overflow")?.safe_div(ann)?,
        "y: b overflow",
    )?;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let numerator = y
            .safe_mul(y, "y: y² overflow")?
            .safe_add(c, "y: numerator overflow")?;
        let two_y_b = y
            .safe_mul(n, "y: 2y overflow")?
            .safe_add(b, "y: denominator overflow")?;
        let denominator = if two_y_b > d {
            two_y_b - d
        } else {
            y.safe_mul(n, "y: 2y overflow")? + U256::one()
        };

        let y_next = numerator.safe_div(denominator)?;
        if abs_diff(y_next, y) <= U256::one() {
            return Ok(y_next);
        }
        y = y_next;
    }

    tracing::warn!(%x, %d, amplification, "output solver did not converge");
    Err(AmmError::DidNotConverge("output balance y"))
}
