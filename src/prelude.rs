//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use stableswap_engine::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, AddLiquidityOutcome, Amount, BasisPoints, Decimals, Liquidity,
    RemoveLiquidityOutcome, Rounding, SwapOutcome, Token, TokenAddress, TokenPair,
};

pub use crate::traits::{AssetCustody, FromConfig, LpShareLedger};

pub use crate::math::{CheckedArithmetic, A_PRECISION, MAX_A, PRECISION};

pub use crate::config::{FeeParameters, StableSwapConfig};

pub use crate::error::{AmmError, Result};

pub use crate::pools::{GuardedPool, PoolState, RampState, StableSwapPool};

pub use crate::ledger::{InMemoryCustody, InMemoryLpLedger};
