//! Volatility-driven swap fee.
//!
//! The tracker samples the pool's spot ratio `b1 / b0` (on 18-decimal
//! balances) at most once per timestamp, keeps a time-weighted price
//! accumulator, and measures volatility as the relative distance of the
//! current ratio from a fixed 1:1 anchor:
//!
//! ```text
//! volatility = |price − base_price| · 1e18 / base_price
//! fee        = clamp(base_fee + volatility · multiplier / 1e18, min_fee, max_fee)
//! ```
//!
//! `base_price` is set to `1e18` at creation and never moves, so a pool
//! that settles away from parity keeps paying the elevated fee.

use primitive_types::U256;

use crate::config::FeeParameters;
use crate::error::AmmError;
use crate::math::{abs_diff, PRECISION};

/// Fee configuration and volatility tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicFeeModel {
    parameters: FeeParameters,
    base_price: U256,
    last_price: U256,
    price_accumulator: U256,
    price_timestamp_last: u64,
    volatility: U256,
}

/// Read-only view of the fee model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeDetail {
    /// Configured bounds and multiplier.
    pub parameters: FeeParameters,
    /// Fee rate that the next swap at the current volatility would pay.
    pub current_fee: u128,
    /// Last measured volatility (`1e18` = 100%).
    pub volatility: U256,
    /// Anchor price volatility is measured against.
    pub base_price: U256,
    /// Last sampled spot ratio.
    pub last_price: U256,
    /// Time-weighted price accumulator (wraps on overflow).
    pub price_accumulator: U256,
    /// Timestamp of the last sample.
    pub price_timestamp_last: u64,
}

impl DynamicFeeModel {
    /// Creates a tracker anchored at 1:1 with zero volatility.
    #[must_use]
    pub const fn new(parameters: FeeParameters, now: u64) -> Self {
        Self {
            parameters,
            base_price: PRECISION,
            last_price: PRECISION,
            price_accumulator: U256::zero(),
            price_timestamp_last: now,
            volatility: U256::zero(),
        }
    }

    /// Samples the spot ratio of `scaled_balances` at `now`.
    ///
    /// Does nothing when `now` equals the last sample time.  A zero balance
    /// only advances the timestamp: the ratio is undefined, so neither the
    /// last price nor the volatility changes.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if `b1 · 1e18` leaves 256 bits.
    pub fn update_volatility(&mut self, scaled_balances: &[U256; 2], now: u64) -> Result<(), AmmError> {
        if now == self.price_timestamp_last {
            return Ok(());
        }
        let elapsed = U256::from(now.saturating_sub(self.price_timestamp_last));
        let (weighted, _) = self.last_price.overflowing_mul(elapsed);
        let (accumulated, _) = self.price_accumulator.overflowing_add(weighted);
        self.price_accumulator = accumulated;
        self.price_timestamp_last = now;

        let [b0, b1] = *scaled_balances;
        if b0.is_zero() || b1.is_zero() {
            return Ok(());
        }
        let price = b1
            .checked_mul(PRECISION)
            .ok_or(AmmError::Overflow("volatility price overflow"))?
            / b0;

        self.last_price = price;
        self.volatility = abs_diff(price, self.base_price).saturating_mul(PRECISION) / self.base_price;
        Ok(())
    }

    /// Current fee rate, always within `[min_fee, max_fee]`.
    #[must_use]
    pub fn calculate_dynamic_fee(&self) -> u128 {
        let p = &self.parameters;
        let surcharge = self
            .volatility
            .saturating_mul(U256::from(p.volatility_multiplier()))
            / PRECISION;
        let fee = U256::from(p.base_fee())
            .saturating_add(surcharge)
            .min(U256::from(p.max_fee()))
            .max(U256::from(p.min_fee()));
        fee.low_u128()
    }

    /// Replaces the fee parameters; tracking state is kept.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeParameters`] if the bounds are not ordered.
    /// - [`AmmError::FeeTooHigh`] if `max_fee` exceeds the cap.
    pub fn set_parameters(&mut self, parameters: FeeParameters) -> Result<(), AmmError> {
        parameters.validate()?;
        self.parameters = parameters;
        Ok(())
    }

    /// Configured parameters.
    #[must_use]
    pub const fn parameters(&self) -> FeeParameters {
        self.parameters
    }

    /// Last measured volatility.
    #[must_use]
    pub const fn volatility(&self) -> U256 {
        self.volatility
    }

    /// Snapshot for the query surface.
    #[must_use]
    pub fn fee_detail(&self) -> FeeDetail {
        FeeDetail {
            parameters: self.parameters,
            current_fee: self.calculate_dynamic_fee(),
            volatility: self.volatility,
            base_price: self.base_price,
            last_price: self.last_price,
            price_accumulator: self.price_accumulator,
            price_timestamp_last: self.price_timestamp_last,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_volatility(mut self, volatility: U256) -> Self {
        self.volatility = volatility;
        self
    }
}
