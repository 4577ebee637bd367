//! Value types used throughout the engine.
//!
//! Newtypes with validated constructors model token identities, raw
//! amounts, LP shares and operation outcomes.  Curve math itself runs on
//! [`U256`](primitive_types::U256); these types sit at the pool boundary.

mod address;
mod amount;
mod basis_points;
mod decimals;
mod liquidity;
mod outcome;
mod quantity;
mod rounding;
mod token;
mod token_pair;

pub use address::{AccountId, TokenAddress};
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use decimals::{Decimals, TARGET_DECIMALS};
pub use liquidity::Liquidity;
pub use outcome::{AddLiquidityOutcome, RemoveLiquidityOutcome, SwapOutcome};
pub use rounding::Rounding;
pub use token::Token;
pub use token_pair::TokenPair;
