//! Construction of pools from declarative configuration.
//!
//! # Validation Contract
//!
//! Implementations validate the whole configuration before building
//! anything, so a successfully constructed pool starts in a valid state:
//!
//! - the token pair has two distinct addresses
//! - the amplification is within `(0, MAX_A]`
//! - fee bounds are ordered and capped
//!
//! There is no blanket implementation; every pool-config pairing is
//! written out explicitly.

use crate::error::AmmError;

/// Builds a value from a configuration of type `C`.
///
/// # Implementors
///
/// - `impl FromConfig<StableSwapConfig> for StableSwapPool`
///
/// # Errors
///
/// Returns the first validation error found in `config`.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// The configuration is borrowed so it can be reused (for example to
    /// create a second pool in a test).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmplification`] if the amplification is out
    ///   of range.
    /// - [`AmmError::InvalidFeeParameters`] / [`AmmError::FeeTooHigh`] if
    ///   the fee parameters are invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
