//! LP share ledger collaborator.
//!
//! Ownership of pool shares lives outside the pool state.  The pool reads
//! [`LpShareLedger::total_supply`] before every liquidity operation and
//! instructs the ledger to mint or burn afterwards.

use crate::domain::{AccountId, Liquidity};
use crate::error::AmmError;

/// Fungible LP share accounting.
pub trait LpShareLedger {
    /// Total outstanding LP shares.
    #[must_use]
    fn total_supply(&self) -> Liquidity;

    /// Shares held by `account`.
    #[must_use]
    fn balance_of(&self, account: &AccountId) -> Liquidity;

    /// Creates `amount` new shares owned by `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would exceed `u128`.
    fn mint(&mut self, to: &AccountId, amount: Liquidity) -> Result<(), AmmError>;

    /// Destroys `amount` shares owned by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLpBalance`] if `from` holds fewer
    /// than `amount` shares.
    fn burn(&mut self, from: &AccountId, amount: Liquidity) -> Result<(), AmmError>;
}
