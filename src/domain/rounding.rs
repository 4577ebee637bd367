//! Rounding direction for integer division on the pool boundary.
//!
//! Every quotient the engine hands to or takes from a caller rounds in the
//! pool's favour:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | swap output, LP shares minted, withdrawal amounts | [`Rounding::Down`] |
//! | swap fee | [`Rounding::Up`] |
//! | protocol fee carve-out | [`Rounding::Down`] (stays with LPs) |

use primitive_types::U256;

use crate::error::AmmError;

/// Direction a non-exact quotient is resolved in.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::domain::Rounding;
///
/// let (seven, two) = (U256::from(7u8), U256::from(2u8));
/// assert_eq!(Rounding::Down.divide(seven, two), Ok(U256::from(3u8)));
/// assert_eq!(Rounding::Up.divide(seven, two), Ok(U256::from(4u8)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    Down,
}

impl Rounding {
    /// `numerator / denominator`, resolved in this direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
    pub fn divide(self, numerator: U256, denominator: U256) -> Result<U256, AmmError> {
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let (quotient, remainder) = numerator.div_mod(denominator);
        match self {
            // A non-zero remainder means quotient < U256::MAX.
            Self::Up if !remainder.is_zero() => Ok(quotient + U256::one()),
            _ => Ok(quotient),
        }
    }
}
