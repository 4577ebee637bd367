//! Configuration for two-asset StableSwap pools.

use super::FeeParameters;
use crate::domain::TokenPair;
use crate::error::AmmError;
use crate::math::validate_amplification;

/// Immutable creation parameters of a [`StableSwapPool`](crate::pools::StableSwapPool).
///
/// # Amplification
///
/// `amplification` is `A · A_PRECISION` (`A_PRECISION = 100`), so
/// `20_000` means `A = 200`.
///
/// - `A = 1`: close to constant product (`x · y = k`)
/// - `A → ∞`: close to constant sum (`x + y = const`)
///
/// # Validation
///
/// - `amplification` in `(0, MAX_A]`
/// - fee parameters ordered and capped (see [`FeeParameters::validate`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStableSwapConfig"))]
pub struct StableSwapConfig {
    token_pair: TokenPair,
    amplification: u128,
    fee_parameters: FeeParameters,
    created_at: u64,
}

impl StableSwapConfig {
    /// Creates a new `StableSwapConfig`.
    ///
    /// # Arguments
    ///
    /// - `amplification`: scaled amplification coefficient.
    /// - `created_at`: pool creation timestamp in seconds; the
    ///   amplification schedule and volatility tracker start here.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmplification`] if `amplification` is out of range.
    /// - [`AmmError::InvalidFeeParameters`] / [`AmmError::FeeTooHigh`] for bad fees.
    pub fn new(
        token_pair: TokenPair,
        amplification: u128,
        fee_parameters: FeeParameters,
        created_at: u64,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token_pair,
            amplification,
            fee_parameters,
            created_at,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`StableSwapConfig::new`].
    pub fn validate(&self) -> Result<(), AmmError> {
        validate_amplification(self.amplification)?;
        self.fee_parameters.validate()
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the scaled amplification coefficient.
    #[must_use]
    pub const fn amplification(&self) -> u128 {
        self.amplification
    }

    /// Returns the fee parameters.
    #[must_use]
    pub const fn fee_parameters(&self) -> FeeParameters {
        self.fee_parameters
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }
}

/// Unchecked field layout of [`StableSwapConfig`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub struct RawStableSwapConfig {
    token_pair: TokenPair,
    amplification: u128,
    fee_parameters: FeeParameters,
    created_at: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStableSwapConfig> for StableSwapConfig {
    type Error = AmmError;

    fn try_from(raw: RawStableSwapConfig) -> Result<Self, Self::Error> {
        Self::new(raw.token_pair, raw.amplification, raw.fee_parameters, raw.created_at)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token, TokenAddress};
    use crate::math::MAX_A;

    fn make_pair() -> TokenPair {
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let Ok(d18) = Decimals::new(18) else {
            panic!("valid decimals");
        };
        let tok_a = Token::new(TokenAddress::from_bytes([1u8; 32]), d6);
        let tok_b = Token::new(TokenAddress::from_bytes([2u8; 32]), d18);
        let Ok(pair) = TokenPair::new(tok_a, tok_b) else {
            panic!("expected valid pair");
        };
        pair
    }

    fn fees() -> FeeParameters {
        let Ok(f) = FeeParameters::new(400_000_000_000_000, 0, 10_000_000_000_000_000, 0) else {
            panic!("valid fees");
        };
        f
    }

    #[test]
    fn valid_config() {
        assert!(StableSwapConfig::new(make_pair(), 20_000, fees(), 0).is_ok());
    }

    #[test]
    fn zero_amplification_rejected() {
        assert!(matches!(
            StableSwapConfig::new(make_pair(), 0, fees(), 0),
            Err(AmmError::InvalidAmplification(_))
        ));
    }

    #[test]
    fn amplification_above_max_rejected() {
        assert!(matches!(
            StableSwapConfig::new(make_pair(), MAX_A + 1, fees(), 0),
            Err(AmmError::InvalidAmplification(_))
        ));
    }

    #[test]
    fn accessors() {
        let pair = make_pair();
        let Ok(cfg) = StableSwapConfig::new(pair, 20_000, fees(), 1_700_000_000) else {
            panic!("expected Ok");
        };
        assert_eq!(*cfg.token_pair(), pair);
        assert_eq!(cfg.amplification(), 20_000);
        assert_eq!(cfg.fee_parameters(), fees());
        assert_eq!(cfg.created_at(), 1_700_000_000);
    }
}
