//! Unified error types for the StableSwap engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  The enum is closed: every failure the pool, the solvers or
//! a collaborator can report maps to exactly one variant, and every
//! failure is terminal for the call that produced it (no partial state
//! mutation is ever left behind).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every error condition the engine can report.
///
/// Variants carrying a `&'static str` describe the arithmetic step or
/// rule that failed, which keeps the enum `Copy` and cheap to compare in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    /// Amplification outside `(0, MAX_A]`, or a ramp target outside
    /// `[A_PRECISION, MAX_A]`.
    #[error("invalid amplification: {0}")]
    InvalidAmplification(&'static str),

    /// The ramp end time is not far enough in the future.
    #[error("amplification ramp too short")]
    RampTooShort,

    /// The ramp is in the wrong state for the call: a new ramp was
    /// requested while one is running, or a stop while none is.
    #[error("amplification ramp already started or not running")]
    RampAlreadyStarted,

    /// Fee bounds violate `min_fee <= base_fee <= max_fee`.
    #[error("invalid fee parameters: {0}")]
    InvalidFeeParameters(&'static str),

    /// The maximum fee exceeds the hard cap.
    #[error("fee exceeds the maximum fee cap")]
    FeeTooHigh,

    /// The protocol fee share exceeds 50%.
    #[error("protocol fee share exceeds 50%")]
    InvalidProtocolFeeShare,

    /// A principal amount is zero where a non-zero value is required.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// The supplied token is not one of the pool's assets.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Swap source and destination resolve to the same asset.
    #[error("swap source and destination are the same token")]
    SameTokenIndices,

    /// A token index outside `{0, 1}`.
    #[error("token index out of range")]
    InvalidTokenIndex,

    /// The computed output or mint is below the caller's minimum.
    #[error("slippage too high: minimum {minimum}, actual {actual}")]
    SlippageTooHigh {
        /// Minimum the caller asked for.
        minimum: u128,
        /// Amount the pool actually computed.
        actual: u128,
    },

    /// The pool cannot serve the request with its current reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The swap solver produced a target balance above the reserve.
    #[error("solver output exceeds available balance")]
    OutputExceedsBalance,

    /// Arithmetic overflow in the named step.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow in the named step.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An iterative solver exhausted its iteration budget.
    #[error("solver did not converge: {0}")]
    DidNotConverge(&'static str),

    /// Token decimals outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A pool call arrived while another call on the same pool is in
    /// flight.
    #[error("pool is busy: re-entrant call rejected")]
    Reentrancy,

    /// An administrative call from an account other than the admin.
    #[error("caller is not the pool admin")]
    Unauthorized,

    /// An LP burn larger than the holder's balance.
    #[error("insufficient LP balance")]
    InsufficientLpBalance,

    /// The asset custody collaborator refused a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(&'static str),
}
