//! Two-asset StableSwap pool state machine (Curve style).
//!
//! The pool owns the reserves, the amplification schedule, the dynamic fee
//! tracker and the protocol fee routing.  It performs no transfers and
//! does not own the LP supply: the caller reads the supply from its
//! [`LpShareLedger`](crate::traits::LpShareLedger) and passes it in, and
//! moves tokens according to the returned outcome.
//! [`GuardedPool`](super::GuardedPool) wires both collaborators up.
//!
//! # Swap Algorithm (token `i` → token `j`)
//!
//! 1. `A = ramp.current_a(now)`, volatility sampled on pre-swap balances
//! 2. `fee = ⌈amount_in · fee_rate / 1e18⌉`
//! 3. `dy = get_y(i, j, scale(amount_in − fee), scaled_balances, A)`
//! 4. `amount_out = ⌊dy / scaling_factor_j⌋`
//! 5. `balance_i += amount_in − protocol_fee`, `balance_j −= amount_out`
//!
//! # Atomicity
//!
//! Every mutating operation runs on a copy of the state that replaces the
//! live state only when the whole operation succeeded.  Simulations run
//! the same code on a copy that is discarded.

use core::fmt;

use primitive_types::U256;

use super::amplification::{AmplificationRamp, RampStatus};
use super::fee_model::{DynamicFeeModel, FeeDetail};
use crate::config::{FeeParameters, StableSwapConfig};
use crate::domain::{
    AccountId, AddLiquidityOutcome, Amount, BasisPoints, Liquidity, RemoveLiquidityOutcome,
    Rounding, SwapOutcome, Token, TokenPair,
};
use crate::error::AmmError;
use crate::math::{
    calculate_invariant, get_y, mul_up, spot_price, CheckedArithmetic,
};
use crate::traits::FromConfig;

/// Where the protocol's share of swap fees goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolFee {
    receiver: Option<AccountId>,
    share: BasisPoints,
}

impl ProtocolFee {
    /// Account receiving the carve-out, if enabled.
    #[must_use]
    pub const fn receiver(&self) -> Option<AccountId> {
        self.receiver
    }

    /// Share of each swap fee routed to the receiver.
    #[must_use]
    pub const fn share(&self) -> BasisPoints {
        self.share
    }

    /// Returns `true` when a receiver is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Read-only snapshot of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    /// Tokens in canonical order.
    pub token_pair: TokenPair,
    /// Raw reserves in index order.
    pub balances: [Amount; 2],
    /// Amplification in effect at the snapshot time.
    pub amplification: u128,
    /// Fee rate the next swap would pay (before re-sampling volatility).
    pub fee_rate: u128,
    /// Outstanding LP shares as supplied by the caller.
    pub lp_supply: Liquidity,
    /// Last measured volatility.
    pub volatility: U256,
    /// Invariant of the current reserves.
    pub invariant: U256,
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool(balances=[{}, {}], A={}, fee={}, supply={}, D={})",
            self.balances[0],
            self.balances[1],
            self.amplification,
            self.fee_rate,
            self.lp_supply,
            self.invariant
        )
    }
}

/// A two-asset StableSwap pool.
///
/// Created from a [`StableSwapConfig`] via [`FromConfig`].  The pool
/// starts empty; the first deposit must provide both assets.
///
/// # State
///
/// - `balances`: raw reserves in each token's native precision
/// - `scaling_factors`: `10^(18 − decimals)` per token, fixed at creation
/// - `ramp`: amplification schedule
/// - `fee_model`: dynamic fee parameters and volatility tracker
/// - `protocol_fee`: optional fee carve-out
///
/// # Example
///
/// ```rust
/// use stableswap_engine::config::{FeeParameters, StableSwapConfig};
/// use stableswap_engine::domain::{Amount, Decimals, Liquidity, Token, TokenAddress, TokenPair};
/// use stableswap_engine::pools::StableSwapPool;
/// use stableswap_engine::traits::FromConfig;
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("ok"));
/// let dai = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18).expect("ok"));
/// let pair = TokenPair::new(usdc, dai).expect("distinct");
/// let fees = FeeParameters::new(400_000_000_000_000, 0, 10_000_000_000_000_000, 0).expect("ok");
/// let cfg = StableSwapConfig::new(pair, 20_000, fees, 0).expect("valid config");
///
/// let mut pool = StableSwapPool::from_config(&cfg).expect("pool created");
///
/// let seed = [Amount::new(1_000_000_000_000), Amount::new(1_000_000 * 10u128.pow(18))];
/// let added = pool
///     .add_liquidity(seed, Liquidity::ZERO, Liquidity::ZERO, 1)
///     .expect("first deposit");
/// assert!(!added.lp_minted().is_zero());
///
/// let swap = pool
///     .swap(&usdc, Amount::new(1_000_000_000), Amount::ZERO, 2)
///     .expect("swap ok");
/// assert!(swap.amount_out().get() > 999 * 10u128.pow(18));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableSwapPool {
    token_pair: TokenPair,
    balances: [Amount; 2],
    scaling_factors: [U256; 2],
    ramp: AmplificationRamp,
    fee_model: DynamicFeeModel,
    protocol_fee: ProtocolFee,
}

impl StableSwapPool {
    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the raw reserves in index order.
    #[must_use]
    pub const fn balances(&self) -> [Amount; 2] {
        self.balances
    }

    /// Returns the per-token scaling factors.
    #[must_use]
    pub const fn scaling_factors(&self) -> [U256; 2] {
        self.scaling_factors
    }

    /// Amplification in effect at `now`.
    #[must_use]
    pub const fn amplification(&self, now: u64) -> u128 {
        self.ramp.current_a(now)
    }

    /// Invariant `D` of the current reserves at `now`'s amplification.
    ///
    /// # Errors
    ///
    /// Propagates solver errors.
    pub fn invariant(&self, now: u64) -> Result<U256, AmmError> {
        calculate_invariant(&self.scaled_balances()?, self.ramp.current_a(now))
    }

    fn scaled_balances(&self) -> Result<[U256; 2], AmmError> {
        Ok([
            self.balances[0].to_scaled(self.scaling_factors[0])?,
            self.balances[1].to_scaled(self.scaling_factors[1])?,
        ])
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    /// Deposits `amounts` (raw, index order) and computes the LP shares to
    /// mint.
    ///
    /// The first deposit mints `D` shares; later deposits mint in
    /// proportion to the invariant growth.  A deposit that does not grow
    /// `D` mints nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if both amounts are zero, or if the pool
    ///   is empty and one amount is zero.
    /// - [`AmmError::SlippageTooHigh`] if the mint is below `min_lp_out`.
    /// - [`AmmError::Overflow`] or solver errors.
    pub fn add_liquidity(
        &mut self,
        amounts: [Amount; 2],
        min_lp_out: Liquidity,
        total_supply: Liquidity,
        now: u64,
    ) -> Result<AddLiquidityOutcome, AmmError> {
        let mut next = self.clone();
        let outcome = next.apply_add_liquidity(amounts, min_lp_out, total_supply, now)?;
        *self = next;
        tracing::debug!(
            amount0 = %amounts[0],
            amount1 = %amounts[1],
            lp_minted = %outcome.lp_minted(),
            "liquidity added"
        );
        Ok(outcome)
    }

    /// LP shares a deposit of `amounts` would mint at `now`.
    ///
    /// # Errors
    ///
    /// Same as [`StableSwapPool::add_liquidity`] with a zero minimum.
    pub fn simulate_add_liquidity(
        &self,
        amounts: [Amount; 2],
        total_supply: Liquidity,
        now: u64,
    ) -> Result<Liquidity, AmmError> {
        let mut scratch = self.clone();
        scratch
            .apply_add_liquidity(amounts, Liquidity::ZERO, total_supply, now)
            .map(|o| o.lp_minted())
    }

    fn apply_add_liquidity(
        &mut self,
        amounts: [Amount; 2],
        min_lp_out: Liquidity,
        total_supply: Liquidity,
        now: u64,
    ) -> Result<AddLiquidityOutcome, AmmError> {
        if amounts[0].is_zero() && amounts[1].is_zero() {
            return Err(AmmError::ZeroAmount("deposit amounts are both zero"));
        }
        if total_supply.is_zero() && (amounts[0].is_zero() || amounts[1].is_zero()) {
            return Err(AmmError::ZeroAmount(
                "initial deposit requires both assets",
            ));
        }

        let amp = self.ramp.current_a(now);
        let old_scaled = self.scaled_balances()?;
        self.fee_model.update_volatility(&old_scaled, now)?;

        let d_old = if old_scaled[0].is_zero() || old_scaled[1].is_zero() {
            U256::zero()
        } else {
            calculate_invariant(&old_scaled, amp)?
        };

        for (balance, amount) in self.balances.iter_mut().zip(amounts) {
            *balance = balance
                .checked_add(&amount)
                .ok_or(AmmError::Overflow("pool balance overflow"))?;
        }
        let d_new = calculate_invariant(&self.scaled_balances()?, amp)?;

        let minted = if total_supply.is_zero() {
            d_new
        } else if d_new <= d_old {
            U256::zero()
        } else {
            total_supply
                .to_u256()
                .safe_mul(d_new - d_old, "LP mint overflow")?
                .safe_div(d_old)?
        };
        let lp_minted = Liquidity::try_from_u256(minted)?;

        if lp_minted < min_lp_out {
            return Err(AmmError::SlippageTooHigh {
                minimum: min_lp_out.get(),
                actual: lp_minted.get(),
            });
        }

        Ok(AddLiquidityOutcome::new(amounts, lp_minted, d_old, d_new))
    }

    /// Burns `lp_amount` shares for a proportional share of both reserves.
    ///
    /// `amount_i = ⌊balance_i · lp_amount / total_supply⌋`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `lp_amount` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `lp_amount > total_supply`.
    /// - [`AmmError::SlippageTooHigh`] if either amount is below its minimum.
    pub fn remove_liquidity(
        &mut self,
        lp_amount: Liquidity,
        min_amounts: [Amount; 2],
        total_supply: Liquidity,
        now: u64,
    ) -> Result<RemoveLiquidityOutcome, AmmError> {
        let mut next = self.clone();
        let outcome = next.apply_remove_liquidity(lp_amount, min_amounts, total_supply, now)?;
        *self = next;
        tracing::debug!(
            lp_burned = %lp_amount,
            amount0 = %outcome.amounts()[0],
            amount1 = %outcome.amounts()[1],
            "liquidity removed"
        );
        Ok(outcome)
    }

    /// Amounts a withdrawal of `lp_amount` would return at `now`.
    ///
    /// # Errors
    ///
    /// Same as [`StableSwapPool::remove_liquidity`] with zero minimums.
    pub fn simulate_remove_liquidity(
        &self,
        lp_amount: Liquidity,
        total_supply: Liquidity,
        now: u64,
    ) -> Result<[Amount; 2], AmmError> {
        let mut scratch = self.clone();
        scratch
            .apply_remove_liquidity(lp_amount, [Amount::ZERO; 2], total_supply, now)
            .map(|o| o.amounts())
    }

    fn apply_remove_liquidity(
        &mut self,
        lp_amount: Liquidity,
        min_amounts: [Amount; 2],
        total_supply: Liquidity,
        now: u64,
    ) -> Result<RemoveLiquidityOutcome, AmmError> {
        if lp_amount.is_zero() {
            return Err(AmmError::ZeroAmount("LP amount is zero"));
        }
        if lp_amount > total_supply {
            return Err(AmmError::InsufficientLiquidity);
        }

        let scaled = self.scaled_balances()?;
        self.fee_model.update_volatility(&scaled, now)?;

        let mut amounts = [Amount::ZERO; 2];
        for i in 0..2 {
            amounts[i] = lp_amount.pro_rata(self.balances[i], total_supply)?;
            if amounts[i] < min_amounts[i] {
                return Err(AmmError::SlippageTooHigh {
                    minimum: min_amounts[i].get(),
                    actual: amounts[i].get(),
                });
            }
        }

        for (balance, amount) in self.balances.iter_mut().zip(amounts) {
            *balance = balance
                .checked_sub(&amount)
                .ok_or(AmmError::Underflow("pool balance underflow"))?;
        }

        Ok(RemoveLiquidityOutcome::new(amounts, lp_amount))
    }

    // -----------------------------------------------------------------------
    // Swap
    // -----------------------------------------------------------------------

    /// Sells `amount_in` of `token_in` for the other token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is empty or
    ///   the output rounds to zero.
    /// - [`AmmError::SlippageTooHigh`] if the output is below
    ///   `min_amount_out`.
    /// - [`AmmError::OutputExceedsBalance`] or other solver errors.
    pub fn swap(
        &mut self,
        token_in: &Token,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let mut next = self.clone();
        let outcome = next.apply_swap(token_in, amount_in, min_amount_out, now)?;
        *self = next;
        tracing::debug!(
            amount_in = %outcome.amount_in(),
            amount_out = %outcome.amount_out(),
            fee = %outcome.fee(),
            protocol_fee = %outcome.protocol_fee(),
            fee_rate = outcome.fee_rate(),
            "swap executed"
        );
        Ok(outcome)
    }

    /// Result of selling `amount_in` of `token_in` at `now`, without
    /// changing the pool.
    ///
    /// # Errors
    ///
    /// Same as [`StableSwapPool::swap`] with a zero minimum.
    pub fn simulate_swap(
        &self,
        token_in: &Token,
        amount_in: Amount,
        now: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let mut scratch = self.clone();
        scratch.apply_swap(token_in, amount_in, Amount::ZERO, now)
    }

    fn apply_swap(
        &mut self,
        token_in: &Token,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let from = self.token_pair.index_of(token_in)?;
        let to = 1 - from;

        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount("swap amount is zero"));
        }
        if self.balances[0].is_zero() || self.balances[1].is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let amp = self.ramp.current_a(now);
        let scaled = self.scaled_balances()?;
        self.fee_model.update_volatility(&scaled, now)?;
        let fee_rate = self.fee_model.calculate_dynamic_fee();

        // Charged in the input token's raw units, rounded against the trader.
        let fee = Amount::try_from_u256(mul_up(amount_in.to_u256(), U256::from(fee_rate))?)?;
        let net_in = amount_in
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("fee exceeds input"))?;

        let dy = get_y(from, to, net_in.to_scaled(self.scaling_factors[from])?, &scaled, amp)?;
        let amount_out = Amount::from_scaled(dy, self.scaling_factors[to])?;

        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if amount_out < min_amount_out {
            return Err(AmmError::SlippageTooHigh {
                minimum: min_amount_out.get(),
                actual: amount_out.get(),
            });
        }

        let protocol_fee = if self.protocol_fee.is_enabled() {
            self.protocol_fee.share.apply(fee, Rounding::Down)?
        } else {
            Amount::ZERO
        };

        let credited = amount_in
            .checked_sub(&protocol_fee)
            .ok_or(AmmError::Underflow("protocol fee exceeds input"))?;
        self.balances[from] = self.balances[from]
            .checked_add(&credited)
            .ok_or(AmmError::Overflow("pool balance overflow"))?;
        self.balances[to] = self.balances[to]
            .checked_sub(&amount_out)
            .ok_or(AmmError::OutputExceedsBalance)?;

        Ok(SwapOutcome::new(
            *token_in,
            self.token_pair.token(to)?,
            amount_in,
            amount_out,
            fee,
            protocol_fee,
            fee_rate,
            amp,
        ))
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Replaces the dynamic fee parameters.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeParameters`] if the bounds are not ordered.
    /// - [`AmmError::FeeTooHigh`] if `max_fee` exceeds the cap.
    pub fn set_fee_parameters(&mut self, parameters: FeeParameters) -> Result<(), AmmError> {
        self.fee_model.set_parameters(parameters)?;
        tracing::info!(
            base_fee = parameters.base_fee(),
            min_fee = parameters.min_fee(),
            max_fee = parameters.max_fee(),
            volatility_multiplier = parameters.volatility_multiplier(),
            "fee parameters updated"
        );
        Ok(())
    }

    /// Routes `share` of every swap fee to `receiver`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidProtocolFeeShare`] if `share` is above
    /// 50%.
    pub fn set_protocol_fee(&mut self, receiver: AccountId, share: BasisPoints) -> Result<(), AmmError> {
        if !share.is_valid_protocol_share() {
            return Err(AmmError::InvalidProtocolFeeShare);
        }
        self.protocol_fee = ProtocolFee {
            receiver: Some(receiver),
            share,
        };
        tracing::info!(%receiver, %share, "protocol fee set");
        Ok(())
    }

    /// Disables the protocol fee carve-out.
    pub fn clear_protocol_fee(&mut self) {
        self.protocol_fee = ProtocolFee::default();
        tracing::info!("protocol fee cleared");
    }

    /// Starts a linear amplification ramp to `future_a`.
    ///
    /// # Errors
    ///
    /// See [`AmplificationRamp::start_ramp`].
    pub fn start_ramp(&mut self, future_a: u128, future_time: u64, now: u64) -> Result<(), AmmError> {
        self.ramp.start_ramp(future_a, future_time, now)?;
        tracing::info!(future_a, future_time, "amplification ramp started");
        Ok(())
    }

    /// Stops the active ramp, freezing the current amplification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RampAlreadyStarted`] if no ramp is in progress.
    pub fn stop_ramp(&mut self, now: u64) -> Result<u128, AmmError> {
        let frozen = self.ramp.stop_ramp(now)?;
        tracing::info!(amplification = frozen, "amplification ramp stopped");
        Ok(frozen)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Snapshot of reserves, amplification, fee and invariant.
    ///
    /// # Errors
    ///
    /// Propagates solver errors.
    pub fn pool_state(&self, total_supply: Liquidity, now: u64) -> Result<PoolState, AmmError> {
        Ok(PoolState {
            token_pair: self.token_pair,
            balances: self.balances,
            amplification: self.ramp.current_a(now),
            fee_rate: self.fee_model.calculate_dynamic_fee(),
            lp_supply: total_supply,
            volatility: self.fee_model.volatility(),
            invariant: self.invariant(now)?,
        })
    }

    /// Marginal price of `base` in units of the other token, in
    /// 18-decimal fixed point and normalised for token decimals.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `base` is not in the pair.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is empty.
    pub fn spot_price(&self, base: &Token, now: u64) -> Result<U256, AmmError> {
        let index = self.token_pair.index_of(base)?;
        spot_price(&self.scaled_balances()?, self.ramp.current_a(now), index)
    }

    /// Amplification schedule as seen at `now`.
    #[must_use]
    pub const fn ramp_status(&self, now: u64) -> RampStatus {
        self.ramp.status(now)
    }

    /// Fee parameters and volatility tracking state.
    #[must_use]
    pub fn fee_detail(&self) -> FeeDetail {
        self.fee_model.fee_detail()
    }

    /// Protocol fee routing.
    #[must_use]
    pub const fn protocol_fee_detail(&self) -> ProtocolFee {
        self.protocol_fee
    }
}

impl FromConfig<StableSwapConfig> for StableSwapPool {
    /// Creates an empty pool from a [`StableSwapConfig`].
    ///
    /// # Errors
    ///
    /// Returns the validation error of the configuration.
    fn from_config(config: &StableSwapConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let pair = *config.token_pair();
        let now = config.created_at();
        Ok(Self {
            token_pair: pair,
            balances: [Amount::ZERO; 2],
            scaling_factors: [pair.first().scaling_factor(), pair.second().scaling_factor()],
            ramp: AmplificationRamp::new(config.amplification(), now)?,
            fee_model: DynamicFeeModel::new(config.fee_parameters(), now),
            protocol_fee: ProtocolFee::default(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, TokenAddress};
    use crate::math::{abs_diff, PRECISION};
    use crate::pools::{RampState, MIN_RAMP_TIME};

    // -- helpers ------------------------------------------------------------

    const E18: u128 = 1_000_000_000_000_000_000;
    const E6: u128 = 1_000_000;
    const BP: u128 = 100_000_000_000_000;

    fn tok(b: u8, decimals: u8) -> Token {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("valid decimals");
        };
        Token::new(TokenAddress::from_bytes([b; 32]), d)
    }

    fn tok_a() -> Token {
        tok(1, 18)
    }

    fn tok_b() -> Token {
        tok(2, 18)
    }

    fn usdc() -> Token {
        tok(3, 6)
    }

    fn unknown_token() -> Token {
        tok(9, 18)
    }

    fn fees(base: u128) -> FeeParameters {
        let Ok(f) = FeeParameters::new(base, 0, 100 * BP, 0) else {
            panic!("valid fees");
        };
        f
    }

    fn empty_pool(t0: Token, t1: Token, base_fee: u128) -> StableSwapPool {
        let Ok(pair) = TokenPair::new(t0, t1) else {
            panic!("valid pair");
        };
        let Ok(cfg) = StableSwapConfig::new(pair, 20_000, fees(base_fee), 0) else {
            panic!("valid config");
        };
        let Ok(pool) = StableSwapPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    /// Seeded 18/18 pool; returns the pool and the LP supply.
    fn seeded(reserve: u128, base_fee: u128) -> (StableSwapPool, Liquidity) {
        let mut pool = empty_pool(tok_a(), tok_b(), base_fee);
        let Ok(out) = pool.add_liquidity(
            [Amount::new(reserve), Amount::new(reserve)],
            Liquidity::ZERO,
            Liquidity::ZERO,
            0,
        ) else {
            panic!("seed deposit");
        };
        (pool, out.lp_minted())
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn from_config_starts_empty() {
        let pool = empty_pool(tok_a(), usdc(), 0);
        assert_eq!(pool.balances(), [Amount::ZERO; 2]);
        assert_eq!(pool.amplification(0), 20_000);
        assert_eq!(pool.invariant(0), Ok(U256::zero()));
    }

    #[test]
    fn scaling_factors_follow_token_order() {
        let pool = empty_pool(usdc(), tok_a(), 0);
        // tok_a (address 1) sorts before usdc (address 3).
        assert_eq!(pool.token_pair().first(), tok_a());
        assert_eq!(pool.scaling_factors(), [U256::one(), U256::exp10(12)]);
    }

    // -- add liquidity ------------------------------------------------------

    #[test]
    fn add_zero_zero_rejected() {
        let mut pool = empty_pool(tok_a(), tok_b(), 0);
        assert_eq!(
            pool.add_liquidity([Amount::ZERO; 2], Liquidity::ZERO, Liquidity::ZERO, 0),
            Err(AmmError::ZeroAmount("deposit amounts are both zero"))
        );
    }

    #[test]
    fn initial_single_sided_deposit_rejected() {
        let mut pool = empty_pool(tok_a(), tok_b(), 0);
        assert_eq!(
            pool.add_liquidity(
                [Amount::new(E18), Amount::ZERO],
                Liquidity::ZERO,
                Liquidity::ZERO,
                0
            ),
            Err(AmmError::ZeroAmount("initial deposit requires both assets"))
        );
        assert_eq!(pool.balances(), [Amount::ZERO; 2]);
    }

    #[test]
    fn initial_deposit_mints_invariant() {
        let (pool, supply) = seeded(1_000_000 * E18, 0);
        let Ok(d) = pool.invariant(0) else {
            panic!("expected Ok");
        };
        assert_eq!(supply.to_u256(), d);
        assert!(abs_diff(d, U256::from(2_000_000 * E18)) <= U256::from(2u8));
    }

    #[test]
    fn proportional_deposit_mints_proportional_shares() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let Ok(out) = pool.add_liquidity(
            [Amount::new(100 * E18), Amount::new(100 * E18)],
            Liquidity::ZERO,
            supply,
            0,
        ) else {
            panic!("expected Ok");
        };
        let expected = supply.get() / 10;
        assert!(out.lp_minted().get().abs_diff(expected) <= 2);
        assert!(out.invariant_after() > out.invariant_before());
    }

    #[test]
    fn single_sided_top_up_allowed_after_seed() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let Ok(out) = pool.add_liquidity(
            [Amount::new(10 * E18), Amount::ZERO],
            Liquidity::ZERO,
            supply,
            0,
        ) else {
            panic!("expected Ok");
        };
        assert!(!out.lp_minted().is_zero());
        assert_eq!(pool.balances()[1], Amount::new(1_000 * E18));
    }

    #[test]
    fn add_slippage_checked_and_state_kept() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let before = pool.clone();
        let Err(err) = pool.add_liquidity(
            [Amount::new(E18), Amount::new(E18)],
            Liquidity::new(u128::MAX),
            supply,
            5,
        ) else {
            panic!("expected Err");
        };
        assert!(matches!(err, AmmError::SlippageTooHigh { .. }));
        assert_eq!(pool, before);
    }

    #[test]
    fn simulate_add_matches_execution() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let amounts = [Amount::new(3 * E18), Amount::new(7 * E18)];
        let Ok(simulated) = pool.simulate_add_liquidity(amounts, supply, 10) else {
            panic!("expected Ok");
        };
        let Ok(out) = pool.add_liquidity(amounts, Liquidity::ZERO, supply, 10) else {
            panic!("expected Ok");
        };
        assert_eq!(simulated, out.lp_minted());
    }

    // -- remove liquidity ---------------------------------------------------

    #[test]
    fn remove_zero_rejected() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        assert_eq!(
            pool.remove_liquidity(Liquidity::ZERO, [Amount::ZERO; 2], supply, 0),
            Err(AmmError::ZeroAmount("LP amount is zero"))
        );
    }

    #[test]
    fn remove_more_than_supply_rejected() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let Some(too_much) = supply.checked_add(&Liquidity::new(1)) else {
            panic!("no overflow");
        };
        assert_eq!(
            pool.remove_liquidity(too_much, [Amount::ZERO; 2], supply, 0),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn remove_half_is_proportional() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let half = Liquidity::new(supply.get() / 2);
        let Ok(out) = pool.remove_liquidity(half, [Amount::ZERO; 2], supply, 0) else {
            panic!("expected Ok");
        };
        for amount in out.amounts() {
            assert!(amount.get().abs_diff(500 * E18) <= 1);
        }
        assert_eq!(out.lp_burned(), half);
    }

    #[test]
    fn remove_all_empties_pool() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let Ok(out) = pool.remove_liquidity(supply, [Amount::ZERO; 2], supply, 0) else {
            panic!("expected Ok");
        };
        assert_eq!(out.amounts(), [Amount::new(1_000 * E18); 2]);
        assert_eq!(pool.balances(), [Amount::ZERO; 2]);
    }

    #[test]
    fn remove_slippage_checked_per_asset() {
        let (mut pool, supply) = seeded(1_000 * E18, 0);
        let before = pool.clone();
        let Err(err) = pool.remove_liquidity(
            Liquidity::new(supply.get() / 2),
            [Amount::ZERO, Amount::new(501 * E18)],
            supply,
            0,
        ) else {
            panic!("expected Err");
        };
        assert!(matches!(err, AmmError::SlippageTooHigh { .. }));
        assert_eq!(pool, before);
    }

    // -- swap ---------------------------------------------------------------

    #[test]
    fn small_swap_near_parity_after_fee() {
        let (mut pool, _) = seeded(1_000_000 * E18, 4 * BP);
        let Ok(out) = pool.swap(&tok_a(), Amount::new(1_000 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert_eq!(out.fee(), Amount::new(1_000 * E18 * 4 / 10_000));
        assert!(out.amount_out() < Amount::new(1_000 * E18));
        // Within 0.1% of the input.
        assert!(out.amount_out() > Amount::new(999 * E18));
        assert_eq!(out.token_out(), tok_b());
    }

    #[test]
    fn half_reserve_swap_slips_markedly() {
        let (mut pool, _) = seeded(1_000_000 * E18, 0);
        let Ok(small) = pool.simulate_swap(&tok_a(), Amount::new(1_000 * E18), 1) else {
            panic!("expected Ok");
        };
        let Ok(out) = pool.swap(&tok_a(), Amount::new(500_000 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert!(out.amount_out() < Amount::new(499_000 * E18));
        // Per-unit rate of the large trade is worse than the marginal one.
        assert!(out.amount_out().get() / 500_000 < small.amount_out().get() / 1_000);
    }

    #[test]
    fn swap_updates_reserves() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        let Ok(out) = pool.swap(&tok_b(), Amount::new(10 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.balances()[1], Amount::new(1_010 * E18));
        assert_eq!(
            pool.balances()[0].get(),
            1_000 * E18 - out.amount_out().get()
        );
    }

    #[test]
    fn swap_grows_invariant_with_fee() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        let Ok(before) = pool.invariant(1) else {
            panic!("expected Ok");
        };
        let Ok(_) = pool.swap(&tok_a(), Amount::new(50 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        let Ok(after) = pool.invariant(1) else {
            panic!("expected Ok");
        };
        assert!(after > before);
    }

    #[test]
    fn swap_unknown_token_rejected() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        assert!(matches!(
            pool.swap(&unknown_token(), Amount::new(1), Amount::ZERO, 1),
            Err(AmmError::InvalidToken(_))
        ));
    }

    #[test]
    fn swap_zero_rejected() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        assert_eq!(
            pool.swap(&tok_a(), Amount::ZERO, Amount::ZERO, 1),
            Err(AmmError::ZeroAmount("swap amount is zero"))
        );
    }

    #[test]
    fn swap_on_empty_pool_rejected() {
        let mut pool = empty_pool(tok_a(), tok_b(), 0);
        assert_eq!(
            pool.swap(&tok_a(), Amount::new(E18), Amount::ZERO, 1),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn dust_swap_rounding_to_zero_rejected() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        assert_eq!(
            pool.swap(&tok_a(), Amount::new(1), Amount::ZERO, 1),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_slippage_leaves_state_unchanged() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        let before = pool.clone();
        let Err(err) = pool.swap(&tok_a(), Amount::new(E18), Amount::new(E18), 7) else {
            panic!("expected Err");
        };
        assert!(matches!(err, AmmError::SlippageTooHigh { minimum, .. } if minimum == E18));
        // Volatility tracking is part of the rolled-back state too.
        assert_eq!(pool, before);
    }

    #[test]
    fn simulate_swap_matches_execution() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        let Ok(sim) = pool.simulate_swap(&tok_a(), Amount::new(5 * E18), 3) else {
            panic!("expected Ok");
        };
        let Ok(real) = pool.swap(&tok_a(), Amount::new(5 * E18), Amount::ZERO, 3) else {
            panic!("expected Ok");
        };
        assert_eq!(sim, real);
    }

    #[test]
    fn mixed_decimals_swap() {
        let mut pool = empty_pool(tok_a(), usdc(), 0);
        let Ok(_) = pool.add_liquidity(
            [Amount::new(1_000_000 * E18), Amount::new(1_000_000 * E6)],
            Liquidity::ZERO,
            Liquidity::ZERO,
            0,
        ) else {
            panic!("seed");
        };
        let Ok(out) = pool.swap(&usdc(), Amount::new(1_000 * E6), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert!(out.amount_out() > Amount::new(999 * E18));
        assert!(out.amount_out() < Amount::new(1_000 * E18));
    }

    #[test]
    fn protocol_fee_is_carved_out_of_reserves() {
        let (mut pool, _) = seeded(1_000 * E18, 10 * BP);
        let receiver = AccountId::from_bytes([0xfe; 32]);
        assert_eq!(pool.set_protocol_fee(receiver, BasisPoints::new(5_000)), Ok(()));
        let Ok(out) = pool.swap(&tok_a(), Amount::new(100 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert_eq!(out.fee(), Amount::new(E18 / 10));
        assert_eq!(out.protocol_fee(), Amount::new(E18 / 20));
        assert_eq!(pool.balances()[0], Amount::new(1_100 * E18 - E18 / 20));
    }

    #[test]
    fn protocol_fee_share_bounded() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        let receiver = AccountId::from_bytes([0xfe; 32]);
        assert_eq!(
            pool.set_protocol_fee(receiver, BasisPoints::new(5_001)),
            Err(AmmError::InvalidProtocolFeeShare)
        );
        assert!(!pool.protocol_fee_detail().is_enabled());
    }

    #[test]
    fn clear_protocol_fee_disables_carve_out() {
        let (mut pool, _) = seeded(1_000 * E18, 10 * BP);
        let receiver = AccountId::from_bytes([0xfe; 32]);
        assert_eq!(pool.set_protocol_fee(receiver, BasisPoints::new(1_000)), Ok(()));
        pool.clear_protocol_fee();
        let Ok(out) = pool.swap(&tok_a(), Amount::new(100 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        assert!(out.protocol_fee().is_zero());
    }

    #[test]
    fn imbalance_raises_dynamic_fee() {
        let (mut pool, _) = seeded(1_000 * E18, 4 * BP);
        let Ok(params) = FeeParameters::new(4 * BP, 4 * BP, 100 * BP, PRECISION.low_u128()) else {
            panic!("valid fees");
        };
        assert_eq!(pool.set_fee_parameters(params), Ok(()));
        let Ok(_) = pool.swap(&tok_a(), Amount::new(400 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        // The next sample sees the skewed reserves.
        let Ok(out) = pool.swap(&tok_a(), Amount::new(E18), Amount::ZERO, 2) else {
            panic!("expected Ok");
        };
        assert!(out.fee_rate() > 4 * BP);
        assert!(out.fee_rate() <= 100 * BP);
    }

    // -- admin & queries ----------------------------------------------------

    #[test]
    fn invalid_fee_parameters_rejected() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        let before = pool.fee_detail();
        let Err(e) = FeeParameters::new(BP, 0, crate::config::MAX_FEE_CAP + 1, 0) else {
            panic!("expected Err");
        };
        assert_eq!(e, AmmError::FeeTooHigh);
        assert_eq!(pool.fee_detail(), before);
        assert_eq!(pool.set_fee_parameters(fees(BP)), Ok(()));
        assert_eq!(pool.fee_detail().parameters.base_fee(), BP);
    }

    #[test]
    fn ramp_changes_amplification_over_time() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        assert_eq!(pool.start_ramp(40_000, 2 * MIN_RAMP_TIME, 0), Ok(()));
        assert_eq!(pool.amplification(MIN_RAMP_TIME), 30_000);
        assert_eq!(pool.ramp_status(MIN_RAMP_TIME).state, RampState::Ramping);
        assert_eq!(pool.stop_ramp(MIN_RAMP_TIME), Ok(30_000));
        assert_eq!(pool.amplification(10 * MIN_RAMP_TIME), 30_000);
    }

    #[test]
    fn stop_without_ramp_rejected() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        assert_eq!(pool.stop_ramp(1), Err(AmmError::RampAlreadyStarted));
    }

    #[test]
    fn spot_price_at_parity_and_after_swap() {
        let (mut pool, _) = seeded(1_000 * E18, 0);
        let Ok(p) = pool.spot_price(&tok_a(), 0) else {
            panic!("expected Ok");
        };
        assert!(abs_diff(p, PRECISION) <= U256::from(1_000u64));

        let Ok(_) = pool.swap(&tok_a(), Amount::new(300 * E18), Amount::ZERO, 1) else {
            panic!("expected Ok");
        };
        let Ok(p_after) = pool.spot_price(&tok_a(), 1) else {
            panic!("expected Ok");
        };
        // Selling A makes A cheaper.
        assert!(p_after < p);
    }

    #[test]
    fn spot_price_unknown_token() {
        let (pool, _) = seeded(1_000 * E18, 0);
        assert!(matches!(
            pool.spot_price(&unknown_token(), 0),
            Err(AmmError::InvalidToken(_))
        ));
    }

    #[test]
    fn pool_state_snapshot() {
        let (pool, supply) = seeded(1_000 * E18, 4 * BP);
        let Ok(state) = pool.pool_state(supply, 0) else {
            panic!("expected Ok");
        };
        assert_eq!(state.balances, [Amount::new(1_000 * E18); 2]);
        assert_eq!(state.amplification, 20_000);
        assert_eq!(state.fee_rate, 4 * BP);
        assert_eq!(state.lp_supply, supply);
        assert_eq!(state.invariant, supply.to_u256());
        assert!(format!("{state}").starts_with("Pool(balances="));
    }
}
