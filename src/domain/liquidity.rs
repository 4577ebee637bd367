//! LP share quantities.

use super::quantity::u128_quantity;
use super::Amount;
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

u128_quantity! {
    /// A quantity of LP shares.
    ///
    /// Shares are denominated in invariant units (the first deposit mints
    /// `D`), not in any token, so they never mix with [`Amount`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stableswap_engine::domain::{Amount, Liquidity};
    ///
    /// // A quarter of the supply claims a quarter of each reserve.
    /// let share = Liquidity::new(250).pro_rata(Amount::new(1_000), Liquidity::new(1_000));
    /// assert_eq!(share, Ok(Amount::new(250)));
    /// ```
    Liquidity,
    "LP amount exceeds u128"
}

impl Liquidity {
    /// `⌊reserve · self / total_supply⌋`: the part of `reserve` these
    /// shares claim.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `total_supply` is zero.
    /// - [`AmmError::Overflow`] if the result does not fit in an [`Amount`].
    pub fn pro_rata(&self, reserve: Amount, total_supply: Self) -> Result<Amount, AmmError> {
        // u128 · u128 always fits in 256 bits.
        let claim = reserve
            .to_u256()
            .safe_mul(self.to_u256(), "withdrawal overflow")?
            .safe_div(total_supply.to_u256())?;
        Amount::try_from_u256(claim)
    }
}
