//! Dynamic fee parameters.

use crate::error::AmmError;

/// Upper bound on `max_fee`: 10% in [`PRECISION`](crate::math::PRECISION)
/// units.
pub const MAX_FEE_CAP: u128 = 100_000_000_000_000_000;

/// Bounds and sensitivity of the volatility-driven swap fee.
///
/// All rates are fixed-point fractions scaled by `1e18`
/// (`4e14` = 0.04%).  The effective fee is
///
/// ```text
/// clamp(base_fee + volatility · volatility_multiplier / 1e18, min_fee, max_fee)
/// ```
///
/// # Validation
///
/// - `min_fee <= base_fee <= max_fee`
/// - `max_fee <= MAX_FEE_CAP`
///
/// # Examples
///
/// ```
/// use stableswap_engine::config::FeeParameters;
///
/// let params = FeeParameters::new(
///     400_000_000_000_000,     // 0.04%
///     100_000_000_000_000,     // 0.01%
///     10_000_000_000_000_000,  // 1%
///     500_000_000_000_000_000, // 0.5x
/// )
/// .expect("valid fee bounds");
/// assert_eq!(params.base_fee(), 400_000_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFeeParameters"))]
pub struct FeeParameters {
    base_fee: u128,
    min_fee: u128,
    max_fee: u128,
    volatility_multiplier: u128,
}

impl FeeParameters {
    /// Creates validated fee parameters.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeParameters`] if the bounds are not ordered.
    /// - [`AmmError::FeeTooHigh`] if `max_fee` exceeds [`MAX_FEE_CAP`].
    pub const fn new(
        base_fee: u128,
        min_fee: u128,
        max_fee: u128,
        volatility_multiplier: u128,
    ) -> Result<Self, AmmError> {
        let params = Self {
            base_fee,
            min_fee,
            max_fee,
            volatility_multiplier,
        };
        match params.validate() {
            Ok(()) => Ok(params),
            Err(e) => Err(e),
        }
    }

    /// Checks the ordering and cap invariants.
    ///
    /// # Errors
    ///
    /// See [`FeeParameters::new`].
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.min_fee > self.base_fee {
            return Err(AmmError::InvalidFeeParameters(
                "min_fee must not exceed base_fee",
            ));
        }
        if self.base_fee > self.max_fee {
            return Err(AmmError::InvalidFeeParameters(
                "base_fee must not exceed max_fee",
            ));
        }
        if self.max_fee > MAX_FEE_CAP {
            return Err(AmmError::FeeTooHigh);
        }
        Ok(())
    }

    /// Fee charged at zero volatility.
    #[must_use]
    pub const fn base_fee(&self) -> u128 {
        self.base_fee
    }

    /// Lower clamp.
    #[must_use]
    pub const fn min_fee(&self) -> u128 {
        self.min_fee
    }

    /// Upper clamp.
    #[must_use]
    pub const fn max_fee(&self) -> u128 {
        self.max_fee
    }

    /// Fee added per unit of volatility.
    #[must_use]
    pub const fn volatility_multiplier(&self) -> u128 {
        self.volatility_multiplier
    }
}

/// Unchecked field layout of [`FeeParameters`] as read from a config file.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub struct RawFeeParameters {
    base_fee: u128,
    min_fee: u128,
    max_fee: u128,
    volatility_multiplier: u128,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFeeParameters> for FeeParameters {
    type Error = AmmError;

    fn try_from(raw: RawFeeParameters) -> Result<Self, Self::Error> {
        Self::new(raw.base_fee, raw.min_fee, raw.max_fee, raw.volatility_multiplier)
    }
}
