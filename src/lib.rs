//! # StableSwap Engine
//!
//! Two-asset StableSwap automated market maker (Curve style): invariant
//! solvers on 256-bit integers, a time-linear amplification ramp, a
//! volatility-driven dynamic fee, and a liquidity-provider share state
//! machine with protocol fee routing.
//!
//! The engine is a library.  It moves no tokens and owns no LP balances
//! itself: both live behind the [`AssetCustody`](traits::AssetCustody) and
//! [`LpShareLedger`](traits::LpShareLedger) traits, and
//! [`GuardedPool`](pools::GuardedPool) ties them to a pool behind a
//! single-writer lock.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for configs, value types and snapshots |
//!
//! # Quick Start
//!
//! ```rust
//! use stableswap_engine::config::{FeeParameters, StableSwapConfig};
//! use stableswap_engine::domain::{Amount, Decimals, Liquidity, Token, TokenAddress, TokenPair};
//! use stableswap_engine::pools::StableSwapPool;
//! use stableswap_engine::traits::FromConfig;
//!
//! let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
//! let dai = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18).expect("valid"));
//! let pair = TokenPair::new(usdc, dai).expect("distinct tokens");
//!
//! // A = 200 (scaled by A_PRECISION), 4 bp base fee.
//! let fees = FeeParameters::new(400_000_000_000_000, 100_000_000_000_000, 10_000_000_000_000_000, 0)
//!     .expect("valid fees");
//! let config = StableSwapConfig::new(pair, 20_000, fees, 0).expect("valid config");
//! let mut pool = StableSwapPool::from_config(&config).expect("pool created");
//!
//! let deposit = [Amount::new(1_000_000 * 1_000_000), Amount::new(1_000_000 * 10u128.pow(18))];
//! let added = pool.add_liquidity(deposit, Liquidity::ZERO, Liquidity::ZERO, 0).expect("seeded");
//! assert!(!added.lp_minted().is_zero());
//!
//! let out = pool
//!     .swap(&usdc, Amount::new(1_000 * 1_000_000), Amount::ZERO, 1)
//!     .expect("swap succeeded");
//! assert!(out.amount_out().get() > 990 * 10u128.pow(18));
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Token`](domain::Token), outcomes |
//! | [`math`] | Checked `U256` arithmetic, fixed-point helpers, invariant and output solvers |
//! | [`config`] | [`StableSwapConfig`](config::StableSwapConfig) and [`FeeParameters`](config::FeeParameters) |
//! | [`pools`] | [`StableSwapPool`](pools::StableSwapPool), ramp, fee model, [`GuardedPool`](pools::GuardedPool) |
//! | [`traits`] | Collaborator boundaries and [`FromConfig`](traits::FromConfig) |
//! | [`ledger`] | In-memory custody and LP ledger |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
