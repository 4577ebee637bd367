//! Single-writer guard around a [`StableSwapPool`] and its collaborators.
//!
//! [`GuardedPool`] owns the pool state, the [`AssetCustody`] and the
//! [`LpShareLedger`] behind one mutex that is only ever acquired with
//! `try_lock`.  A call that finds the pool busy is rejected with
//! [`AmmError::Reentrancy`] instead of waiting, which covers both a
//! concurrent caller and a custody implementation calling back into the
//! pool mid-transfer.
//!
//! # Two-phase execution
//!
//! 1. compute the next pool state on a copy
//! 2. move tokens and LP shares through the collaborators
//! 3. commit the copy
//!
//! If step 2 fails the pool state is left untouched and every
//! collaborator call that already went through is reversed, newest first:
//! a pull is paid back, a payout pulled back, a mint burned and a burn
//! re-minted.  Pulls from the caller come first, so a caller without funds
//! usually fails before anything has moved.

use std::sync::{Mutex, MutexGuard, TryLockError};

use primitive_types::U256;

use super::amplification::RampStatus;
use super::fee_model::FeeDetail;
use super::stable_swap::{PoolState, ProtocolFee, StableSwapPool};
use crate::config::FeeParameters;
use crate::domain::{
    AccountId, AddLiquidityOutcome, Amount, BasisPoints, Liquidity, RemoveLiquidityOutcome,
    SwapOutcome, Token,
};
use crate::error::AmmError;
use crate::traits::{AssetCustody, LpShareLedger};

#[derive(Debug)]
struct Guarded<C, L> {
    pool: StableSwapPool,
    custody: C,
    ledger: L,
}

/// A collaborator call already carried out during settlement.
#[derive(Debug, Clone, Copy)]
enum Leg {
    Pulled(Token, AccountId, Amount),
    Paid(Token, AccountId, Amount),
    Minted(AccountId, Liquidity),
    Burned(AccountId, Liquidity),
}

/// Collaborator calls of one operation, reversed newest first on failure.
struct Settlement<'a, C, L> {
    custody: &'a mut C,
    ledger: &'a mut L,
    done: Vec<Leg>,
}

impl<'a, C: AssetCustody, L: LpShareLedger> Settlement<'a, C, L> {
    fn new(custody: &'a mut C, ledger: &'a mut L) -> Self {
        Self {
            custody,
            ledger,
            done: Vec::with_capacity(3),
        }
    }

    fn pull(&mut self, token: &Token, from: &AccountId, amount: Amount) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.custody.transfer_in(token, from, amount)?;
        self.done.push(Leg::Pulled(*token, *from, amount));
        Ok(())
    }

    fn pay(&mut self, token: &Token, to: &AccountId, amount: Amount) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.custody.transfer_out(token, to, amount)?;
        self.done.push(Leg::Paid(*token, *to, amount));
        Ok(())
    }

    fn mint(&mut self, to: &AccountId, amount: Liquidity) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.ledger.mint(to, amount)?;
        self.done.push(Leg::Minted(*to, amount));
        Ok(())
    }

    fn burn(&mut self, from: &AccountId, amount: Liquidity) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.ledger.burn(from, amount)?;
        self.done.push(Leg::Burned(*from, amount));
        Ok(())
    }

    /// Runs `steps`; if they fail, unwinds what they completed and returns
    /// the original error.
    fn run(mut self, steps: impl FnOnce(&mut Self) -> Result<(), AmmError>) -> Result<(), AmmError> {
        let result = steps(&mut self);
        if result.is_err() {
            self.unwind();
        }
        result
    }

    fn unwind(self) {
        let Self {
            custody,
            ledger,
            done,
        } = self;
        for leg in done.into_iter().rev() {
            let undone = match leg {
                Leg::Pulled(token, from, amount) => custody.transfer_out(&token, &from, amount),
                Leg::Paid(token, to, amount) => custody.transfer_in(&token, &to, amount),
                Leg::Minted(to, amount) => ledger.burn(&to, amount),
                Leg::Burned(from, amount) => ledger.mint(&from, amount),
            };
            match undone {
                Ok(()) => tracing::debug!(?leg, "settlement leg reversed"),
                Err(error) => tracing::error!(?leg, %error, "settlement leg could not be reversed"),
            }
        }
    }
}

/// A pool wired to its collaborators, safe to share between threads.
///
/// # Example
///
/// ```rust
/// use stableswap_engine::config::{FeeParameters, StableSwapConfig};
/// use stableswap_engine::domain::{AccountId, Amount, Decimals, Liquidity, Token, TokenAddress, TokenPair};
/// use stableswap_engine::ledger::{InMemoryCustody, InMemoryLpLedger};
/// use stableswap_engine::pools::{GuardedPool, StableSwapPool};
/// use stableswap_engine::traits::FromConfig;
///
/// let a = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(18).expect("ok"));
/// let b = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18).expect("ok"));
/// let pair = TokenPair::new(a, b).expect("distinct");
/// let fees = FeeParameters::new(0, 0, 0, 0).expect("ok");
/// let pool = StableSwapPool::from_config(&StableSwapConfig::new(pair, 20_000, fees, 0).expect("ok"))
///     .expect("pool");
///
/// let admin = AccountId::from_bytes([0xad; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let mut custody = InMemoryCustody::new();
/// custody.credit(&alice, &a, Amount::new(1_000));
/// custody.credit(&alice, &b, Amount::new(1_000));
///
/// let guarded = GuardedPool::new(pool, custody, InMemoryLpLedger::new(), admin);
/// let added = guarded
///     .add_liquidity(&alice, [Amount::new(1_000), Amount::new(1_000)], Liquidity::ZERO, 1)
///     .expect("deposit");
/// assert_eq!(guarded.lp_balance(&alice), Ok(added.lp_minted()));
/// ```
#[derive(Debug)]
pub struct GuardedPool<C, L> {
    admin: AccountId,
    inner: Mutex<Guarded<C, L>>,
}

impl<C: AssetCustody, L: LpShareLedger> GuardedPool<C, L> {
    /// Wraps `pool` with its collaborators; `admin` gates configuration.
    pub fn new(pool: StableSwapPool, custody: C, ledger: L, admin: AccountId) -> Self {
        Self {
            admin,
            inner: Mutex::new(Guarded {
                pool,
                custody,
                ledger,
            }),
        }
    }

    /// The privileged account.
    #[must_use]
    pub const fn admin(&self) -> AccountId {
        self.admin
    }

    /// Unwraps the pool and its collaborators.
    pub fn into_parts(self) -> (StableSwapPool, C, L) {
        let inner = self
            .inner
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        (inner.pool, inner.custody, inner.ledger)
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Guarded<C, L>>, AmmError> {
        match self.inner.try_lock() {
            Ok(guard) => Ok(guard),
            // State is only ever replaced whole, so a panicked holder
            // cannot have left a partial update behind.
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!("pool busy, call rejected");
                Err(AmmError::Reentrancy)
            }
        }
    }

    fn authorize(&self, caller: &AccountId) -> Result<(), AmmError> {
        if *caller == self.admin {
            Ok(())
        } else {
            tracing::warn!(%caller, "unauthorized administrative call");
            Err(AmmError::Unauthorized)
        }
    }

    // -----------------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------------

    /// Deposits `amounts` from `provider` and mints LP shares to it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - Any error of [`StableSwapPool::add_liquidity`] or of the
    ///   collaborators.
    pub fn add_liquidity(
        &self,
        provider: &AccountId,
        amounts: [Amount; 2],
        min_lp_out: Liquidity,
        now: u64,
    ) -> Result<AddLiquidityOutcome, AmmError> {
        let mut guard = self.acquire()?;
        let state = &mut *guard;

        let supply = state.ledger.total_supply();
        let mut next = state.pool.clone();
        let outcome = next.add_liquidity(amounts, min_lp_out, supply, now)?;

        let tokens = next.token_pair().tokens();
        Settlement::new(&mut state.custody, &mut state.ledger).run(|s| {
            for (token, amount) in tokens.iter().zip(amounts) {
                s.pull(token, provider, amount)?;
            }
            s.mint(provider, outcome.lp_minted())
        })?;

        state.pool = next;
        Ok(outcome)
    }

    /// Burns `lp_amount` of `provider`'s shares and pays out both assets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InsufficientLpBalance`] if `provider` holds too few
    ///   shares.
    /// - Any error of [`StableSwapPool::remove_liquidity`] or of custody.
    pub fn remove_liquidity(
        &self,
        provider: &AccountId,
        lp_amount: Liquidity,
        min_amounts: [Amount; 2],
        now: u64,
    ) -> Result<RemoveLiquidityOutcome, AmmError> {
        let mut guard = self.acquire()?;
        let state = &mut *guard;

        let supply = state.ledger.total_supply();
        let mut next = state.pool.clone();
        let outcome = next.remove_liquidity(lp_amount, min_amounts, supply, now)?;

        let tokens = next.token_pair().tokens();
        Settlement::new(&mut state.custody, &mut state.ledger).run(|s| {
            s.burn(provider, lp_amount)?;
            for (token, amount) in tokens.iter().zip(outcome.amounts()) {
                s.pay(token, provider, amount)?;
            }
            Ok(())
        })?;

        state.pool = next;
        Ok(outcome)
    }

    /// Sells `amount_in` of `token_in` from `trader`.
    ///
    /// The protocol fee, if enabled, is paid out to its receiver in the
    /// input token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - Any error of [`StableSwapPool::swap`] or of custody.
    pub fn swap(
        &self,
        trader: &AccountId,
        token_in: &Token,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let mut guard = self.acquire()?;
        let state = &mut *guard;

        let receiver = state.pool.protocol_fee_detail().receiver();
        let mut next = state.pool.clone();
        let outcome = next.swap(token_in, amount_in, min_amount_out, now)?;

        Settlement::new(&mut state.custody, &mut state.ledger).run(|s| {
            s.pull(token_in, trader, amount_in)?;
            s.pay(&outcome.token_out(), trader, outcome.amount_out())?;
            match receiver {
                Some(receiver) => s.pay(token_in, &receiver, outcome.protocol_fee()),
                None => Ok(()),
            }
        })?;

        state.pool = next;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Replaces the fee parameters.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the admin.
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - Fee validation errors.
    pub fn set_fee_parameters(&self, caller: &AccountId, parameters: FeeParameters) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.acquire()?.pool.set_fee_parameters(parameters)
    }

    /// Routes `share` of swap fees to `receiver`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the admin.
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InvalidProtocolFeeShare`] if `share` exceeds 50%.
    pub fn set_protocol_fee(
        &self,
        caller: &AccountId,
        receiver: AccountId,
        share: BasisPoints,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.acquire()?.pool.set_protocol_fee(receiver, share)
    }

    /// Disables the protocol fee.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the admin.
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    pub fn clear_protocol_fee(&self, caller: &AccountId) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.acquire()?.pool.clear_protocol_fee();
        Ok(())
    }

    /// Starts an amplification ramp.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the admin.
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - Ramp scheduling errors.
    pub fn start_ramp(
        &self,
        caller: &AccountId,
        future_a: u128,
        future_time: u64,
        now: u64,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.acquire()?.pool.start_ramp(future_a, future_time, now)
    }

    /// Stops the active ramp and returns the frozen amplification.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the admin.
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::RampAlreadyStarted`] if no ramp is in progress.
    pub fn stop_ramp(&self, caller: &AccountId, now: u64) -> Result<u128, AmmError> {
        self.authorize(caller)?;
        self.acquire()?.pool.stop_ramp(now)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Pool snapshot with the ledger's LP supply.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy, or solver errors.
    pub fn pool_state(&self, now: u64) -> Result<PoolState, AmmError> {
        let guard = self.acquire()?;
        guard.pool.pool_state(guard.ledger.total_supply(), now)
    }

    /// Marginal price of `base` in units of the other token.
    ///
    /// # Errors
    ///
    /// See [`StableSwapPool::spot_price`].
    pub fn spot_price(&self, base: &Token, now: u64) -> Result<U256, AmmError> {
        self.acquire()?.pool.spot_price(base, now)
    }

    /// Quote for selling `amount_in` of `token_in`.
    ///
    /// # Errors
    ///
    /// See [`StableSwapPool::simulate_swap`].
    pub fn simulate_swap(&self, token_in: &Token, amount_in: Amount, now: u64) -> Result<SwapOutcome, AmmError> {
        self.acquire()?.pool.simulate_swap(token_in, amount_in, now)
    }

    /// LP shares a deposit of `amounts` would mint.
    ///
    /// # Errors
    ///
    /// See [`StableSwapPool::simulate_add_liquidity`].
    pub fn simulate_add_liquidity(&self, amounts: [Amount; 2], now: u64) -> Result<Liquidity, AmmError> {
        let guard = self.acquire()?;
        guard
            .pool
            .simulate_add_liquidity(amounts, guard.ledger.total_supply(), now)
    }

    /// Amounts a withdrawal of `lp_amount` would return.
    ///
    /// # Errors
    ///
    /// See [`StableSwapPool::simulate_remove_liquidity`].
    pub fn simulate_remove_liquidity(&self, lp_amount: Liquidity, now: u64) -> Result<[Amount; 2], AmmError> {
        let guard = self.acquire()?;
        guard
            .pool
            .simulate_remove_liquidity(lp_amount, guard.ledger.total_supply(), now)
    }

    /// Amplification schedule at `now`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn ramp_status(&self, now: u64) -> Result<RampStatus, AmmError> {
        Ok(self.acquire()?.pool.ramp_status(now))
    }

    /// Fee parameters and volatility state.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn fee_detail(&self) -> Result<FeeDetail, AmmError> {
        Ok(self.acquire()?.pool.fee_detail())
    }

    /// Protocol fee routing.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn protocol_fee_detail(&self) -> Result<ProtocolFee, AmmError> {
        Ok(self.acquire()?.pool.protocol_fee_detail())
    }

    /// LP shares held by `account`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn lp_balance(&self, account: &AccountId) -> Result<Liquidity, AmmError> {
        Ok(self.acquire()?.ledger.balance_of(account))
    }

    /// Runs `f` against the custody, for balance inspection.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn with_custody<R>(&self, f: impl FnOnce(&C) -> R) -> Result<R, AmmError> {
        Ok(f(&self.acquire()?.custody))
    }
}
