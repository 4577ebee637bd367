//! Trait abstractions at the pool boundary.
//!
//! - [`AssetCustody`] moves tokens in and out of the pool vault.
//! - [`LpShareLedger`] owns LP share balances and total supply.
//! - [`FromConfig`] builds a pool from its configuration.

mod custody;
mod from_config;
mod lp_ledger;

pub use custody::AssetCustody;
pub use from_config::FromConfig;
pub use lp_ledger::LpShareLedger;
