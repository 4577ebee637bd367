//! Basis-point representation for the protocol fee share.

use core::fmt;

use primitive_types::U256;

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Maximum value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// Largest protocol share of swap fees (50%).
const MAX_PROTOCOL_SHARE_BPS: u32 = 5_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used for the protocol's carve-out of collected swap fees, which is
/// bounded at [`BasisPoints::MAX_PROTOCOL_SHARE`].
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::BasisPoints;
///
/// let share = BasisPoints::new(2_500);
/// assert!(share.is_valid_protocol_share());
/// assert!(!BasisPoints::new(5_001).is_valid_protocol_share());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// 50%, the upper bound of the protocol fee share.
    pub const MAX_PROTOCOL_SHARE: Self = Self(MAX_PROTOCOL_SHARE_BPS);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value may be used as a protocol fee share.
    #[must_use]
    pub const fn is_valid_protocol_share(&self) -> bool {
        self.0 <= MAX_PROTOCOL_SHARE_BPS
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so only a result above
    /// `u128::MAX` (impossible for shares up to 100%) can fail.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit in an
    /// [`Amount`].
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount, AmmError> {
        let product = amount.to_u256() * U256::from(self.0);
        Amount::try_from_u256(rounding.divide(product, U256::from(MAX_BPS))?)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
