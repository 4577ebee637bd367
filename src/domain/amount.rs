//! Raw token amounts.

use primitive_types::U256;

use super::quantity::u128_quantity;
use crate::error::AmmError;
use crate::math::{scale_down, scale_up};

u128_quantity! {
    /// A raw token amount in the smallest native unit of its token.
    ///
    /// Custody balances, swap inputs and outputs and pool reserves are
    /// `Amount`s.  The curve never sees them directly: they are
    /// normalised to 18 decimals with [`Amount::to_scaled`] on the way in
    /// and floored back with [`Amount::from_scaled`] on the way out.
    ///
    /// # Examples
    ///
    /// ```
    /// use primitive_types::U256;
    /// use stableswap_engine::domain::Amount;
    ///
    /// // 1.5 USDC (6 decimals) normalised to 18 decimals.
    /// let usdc = Amount::new(1_500_000);
    /// let factor = U256::exp10(12);
    /// assert_eq!(usdc.to_scaled(factor), Ok(U256::from(1_500_000_000_000_000_000u128)));
    /// ```
    Amount,
    "amount exceeds u128"
}

impl Amount {
    /// Normalises to 18 decimals with the token's scaling factor.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product leaves 256 bits.
    pub fn to_scaled(&self, factor: U256) -> Result<U256, AmmError> {
        scale_up(self.to_u256(), factor)
    }

    /// Converts an 18-decimal value back to raw units, rounding down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `factor` is zero.
    /// - [`AmmError::Overflow`] if the result does not fit in `u128`.
    pub fn from_scaled(value: U256, factor: U256) -> Result<Self, AmmError> {
        Self::try_from_u256(scale_down(value, factor)?)
    }
}
