//! The StableSwap pool and its supporting state.
//!
//! | Type | Role |
//! |------|------|
//! | [`StableSwapPool`] | reserves, swaps, liquidity, admin |
//! | [`AmplificationRamp`] | time-linear `A` schedule |
//! | [`DynamicFeeModel`] | volatility-driven fee rate |
//! | [`GuardedPool`] | single-writer wrapper wiring custody and LP ledger |

mod amplification;
mod fee_model;
mod guarded;
mod stable_swap;

#[cfg(test)]
mod proptest_properties;

pub use amplification::{AmplificationRamp, RampState, RampStatus, MIN_RAMP_TIME};
pub use fee_model::{DynamicFeeModel, FeeDetail};
pub use guarded::GuardedPool;
pub use stable_swap::{PoolState, ProtocolFee, StableSwapPool};
