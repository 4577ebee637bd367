//! StableSwap invariant solver for two assets.
//!
//! # Invariant (n = 2)
//!
//! ```text
//! Ann · (x + y) + D = Ann · D + D³ / (4 · x · y)        Ann = A · 2
//! ```
//!
//! `A` is stored multiplied by [`A_PRECISION`], so every `Ann` term that
//! enters the curve is divided back by `A_PRECISION`.
//!
//! # Newton iteration
//!
//! ```text
//! D_P    = D³ / (4 · x · y)
//! D_next = (Ann·S/A_P + 2·D_P) · D / (Ann·D/A_P − D + 3·D_P)
//! ```
//!
//! `D_P` is built as `D·D/(2·min) · D/(2·max)`: the smaller balance is
//! divided out first so its truncation is not scaled up by `D/(2·min)`.
//! The opposite order can cycle without converging on heavily skewed pools.

use primitive_types::U256;

use super::checked::abs_diff;
use super::fixed_point::div_down;
use super::{mul_down, CheckedArithmetic};
use crate::error::AmmError;

/// Fixed-point scale of the amplification coefficient.
pub const A_PRECISION: u128 = 100;

/// Largest accepted amplification (already scaled by [`A_PRECISION`]).
pub const MAX_A: u128 = 1_000_000 * A_PRECISION;

/// Iteration budget shared by both solvers.
pub const MAX_ITERATIONS: u32 = 255;

/// Number of assets.
const N: u64 = 2;

/// A converged invariant together with the number of Newton steps taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantSolution {
    /// The invariant `D`.
    pub value: U256,
    /// Newton steps performed (zero for an empty pool).
    pub iterations: u32,
}

/// Rejects amplification values outside `(0, MAX_A]`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidAmplification`] when out of range.
pub const fn validate_amplification(amplification: u128) -> Result<(), AmmError> {
    if amplification == 0 {
        return Err(AmmError::InvalidAmplification(
            "amplification must be positive",
        ));
    }
    if amplification > MAX_A {
        return Err(AmmError::InvalidAmplification(
            "amplification exceeds MAX_A",
        ));
    }
    Ok(())
}

/// Computes the invariant `D` for `balances` (18-decimal normalised).
///
/// Returns `0` for an empty pool.
///
/// # Errors
///
/// - [`AmmError::InvalidAmplification`] if `amplification ∉ (0, MAX_A]`.
/// - [`AmmError::Overflow`] if an intermediate product leaves 256 bits.
/// - [`AmmError::DidNotConverge`] if `|ΔD| <= 1` is not reached within
///   [`MAX_ITERATIONS`].
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::math::calculate_invariant;
///
/// let balances = [U256::from(1_000_000u64), U256::from(1_000_000u64)];
/// let d = calculate_invariant(&balances, 20_000).expect("converges");
/// assert_eq!(d, U256::from(2_000_000u64));
/// ```
pub fn calculate_invariant(balances: &[U256; 2], amplification: u128) -> Result<U256, AmmError> {
    solve_invariant(balances, amplification).map(|s| s.value)
}

/// Same as [`calculate_invariant`] but also reports the iteration count.
///
/// # Errors
///
/// See [`calculate_invariant`].
pub fn solve_invariant(
    balances: &[U256; 2],
    amplification: u128,
) -> Result<InvariantSolution, AmmError> {
    validate_amplification(amplification)?;

    let [x, y] = *balances;
    let sum = x.safe_add(y, "D: sum overflow")?;
    if sum.is_zero() {
        return Ok(InvariantSolution {
            value: U256::zero(),
            iterations: 0,
        });
    }

    let n = U256::from(N);
    let a_precision = U256::from(A_PRECISION);
    let ann = U256::from(amplification).safe_mul(n, "D: Ann overflow")?;
    let two_x = x.safe_mul(n, "D: 2x overflow")?;
    let two_y = y.safe_mul(n, "D: 2y overflow")?;
    let (two_small, two_large) = (two_x.min(two_y), two_x.max(two_y));
    let ann_sum = ann
        .safe_mul(sum, "D: Ann·S overflow")?
        .safe_div(a_precision)?;

    let mut d = sum;
    for iteration in 1..=MAX_ITERATIONS {
        let d_p = if x.is_zero() || y.is_zero() {
            U256::zero()
        } else {
            d.safe_mul(d, "D: D_P overflow")?
                .safe_div(two_small)?
                .safe_mul(d, "D: D_P overflow")?
                .safe_div(two_large)?
        };

        let numerator = ann_sum
            .safe_add(d_p.safe_mul(n, "D: 2·D_P overflow")?, "D: numerator overflow")?
            .safe_mul(d, "D: numerator overflow")?;

        let denominator = ann
            .safe_mul(d, "D: Ann·D overflow")?
            .safe_div(a_precision)?
            .safe_add(
                d_p.safe_mul(U256::from(N + 1), "D: 3·D_P overflow")?,
                "D: denominator overflow",
            )?
            .checked_sub(d)
            .unwrap_or_default();

        if denominator.is_zero() {
            // The step is undefined; the last iterate is the best estimate.
            return Ok(InvariantSolution {
                value: d,
                iterations: iteration,
            });
        }

        let d_next = numerator / denominator;
        if abs_diff(d_next, d) <= U256::one() {
            return Ok(InvariantSolution {
                value: d_next,
                iterations: iteration,
            });
        }
        d = d_next;
    }

    tracing::warn!(%x, %y, amplification, "invariant solver did not converge");
    Err(AmmError::DidNotConverge("invariant D"))
}

/// Marginal price of asset `base` in units of the other asset, scaled by
/// [`PRECISION`](super::PRECISION).
///
/// Implicit differentiation of the invariant gives
///
/// ```text
/// |dy/dx| = (4·Ann·x²y² + A_P·D³·y) / (4·Ann·x²y² + A_P·D³·x)
/// ```
///
/// evaluated on `x/D` and `y/D` in fixed point so the fourth powers stay
/// in range.
///
/// # Errors
///
/// - [`AmmError::InvalidTokenIndex`] if `base > 1`.
/// - [`AmmError::InsufficientLiquidity`] if either balance is zero.
/// - Any error from [`calculate_invariant`].
pub fn spot_price(
    balances: &[U256; 2],
    amplification: u128,
    base: usize,
) -> Result<U256, AmmError> {
    if base > 1 {
        return Err(AmmError::InvalidTokenIndex);
    }
    if balances[0].is_zero() || balances[1].is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }

    let d = calculate_invariant(balances, amplification)?;
    let x = div_down(balances[base], d)?;
    let y = div_down(balances[1 - base], d)?;

    let a_precision = U256::from(A_PRECISION);
    // 4·Ann with Ann = N·A.
    let four_ann = U256::from(amplification).safe_mul(U256::from(4 * N), "price: 4·Ann overflow")?;
    let x2y2 = mul_down(mul_down(x, x)?, mul_down(y, y)?)?;
    let ann_term = x2y2.safe_mul(four_ann, "price: Ann term overflow")?;

    let numerator = ann_term.safe_add(
        y.safe_mul(a_precision, "price: numerator overflow")?,
        "price: numerator overflow",
    )?;
    let denominator = ann_term.safe_add(
        x.safe_mul(a_precision, "price: denominator overflow")?,
        "price: denominator overflow",
    )?;
    div_down(numerator, denominator)
}
