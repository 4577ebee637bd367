//! Checked arithmetic on [`U256`] with typed errors.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked operations of
//! [`U256`] into [`Result`]s carrying a specific [`AmmError`] variant, so
//! every step of the solvers can be chained with `?` and still report
//! *which* step overflowed.
//!
//! # Examples
//!
//! ```
//! use primitive_types::U256;
//! use stableswap_engine::math::CheckedArithmetic;
//!
//! let a = U256::from(100u8);
//! let sum = a.safe_add(U256::from(1u8), "example add");
//! assert_eq!(sum, Ok(U256::from(101u8)));
//! assert!(U256::MAX.safe_mul(a, "example mul").is_err());
//! ```

use primitive_types::U256;

use crate::error::AmmError;

/// Fallible arithmetic returning [`AmmError`] instead of `None`.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: saturation hides bugs; errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `ctx` on overflow.
    fn safe_add(self, other: Self, ctx: &'static str) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] with `ctx` if the result would be
    /// negative.
    fn safe_sub(self, other: Self, ctx: &'static str) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `ctx` on overflow.
    fn safe_mul(self, other: Self, ctx: &'static str) -> Result<Self, AmmError>;

    /// Truncating division.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(self, other: Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(self, other: Self, ctx: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other).ok_or(AmmError::Overflow(ctx))
    }

    #[inline]
    fn safe_sub(self, other: Self, ctx: &'static str) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::Underflow(ctx))
    }

    #[inline]
    fn safe_mul(self, other: Self, ctx: &'static str) -> Result<Self, AmmError> {
        self.checked_mul(other).ok_or(AmmError::Overflow(ctx))
    }

    #[inline]
    fn safe_div(self, other: Self) -> Result<Self, AmmError> {
        self.checked_div(other).ok_or(AmmError::DivisionByZero)
    }
}

/// Absolute difference of two `U256` values.
#[inline]
#[must_use]
pub fn abs_diff(a: U256, b: U256) -> U256 {
    if a > b {
        a - b
    } else {
        b - a
    }
}
