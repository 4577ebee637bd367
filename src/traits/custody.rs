//! Asset custody collaborator.
//!
//! The pool never moves tokens itself.  [`AssetCustody`] is the boundary
//! to whatever holds the pool's reserves: a token program, a bank module,
//! or the [`InMemoryCustody`](crate::ledger::InMemoryCustody) used in
//! tests and demos.
//!
//! # Contract
//!
//! - A failed transfer must leave custody unchanged.
//! - Implementations may call back into the pool; the
//!   [`GuardedPool`](crate::pools::GuardedPool) rejects such calls with
//!   [`AmmError::Reentrancy`].

use crate::domain::{AccountId, Amount, Token};
use crate::error::AmmError;

/// Moves tokens between user accounts and the pool vault.
pub trait AssetCustody {
    /// Pulls `amount` of `token` from `from` into the pool vault.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] (or an implementation-specific
    /// variant) if the transfer cannot be completed.
    fn transfer_in(&mut self, token: &Token, from: &AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Pays `amount` of `token` out of the pool vault to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] (or an implementation-specific
    /// variant) if the transfer cannot be completed.
    fn transfer_out(&mut self, token: &Token, to: &AccountId, amount: Amount) -> Result<(), AmmError>;
}
