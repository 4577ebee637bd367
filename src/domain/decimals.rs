//! Token decimal places and the derived scaling factor.

use primitive_types::U256;

use crate::error::AmmError;

/// Internal precision every balance is normalised to before curve math.
pub const TARGET_DECIMALS: u8 = 18;

/// Number of decimal places of a token's native unit.
///
/// Valid range is `0..=18`: the engine normalises every balance to 18
/// decimals by multiplying with `10^(18 - decimals)`, so more precise
/// tokens cannot be represented.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert_eq!(usdc.scaling_factor(), U256::exp10(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// The internal precision (18).
    pub const MAX: Self = Self(TARGET_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > TARGET_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Multiplier normalising a native amount to 18 decimals:
    /// `10^(18 - decimals)`.
    #[must_use]
    pub fn scaling_factor(&self) -> U256 {
        U256::exp10(usize::from(TARGET_DECIMALS - self.0))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
