//! In-memory LP share ledger.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Liquidity};
use crate::error::AmmError;
use crate::traits::LpShareLedger;

/// LP share balances and total supply held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLpLedger {
    balances: BTreeMap<AccountId, Liquidity>,
    total_supply: Liquidity,
}

impl InMemoryLpLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts holding a non-zero balance.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }
}

impl LpShareLedger for InMemoryLpLedger {
    fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    fn balance_of(&self, account: &AccountId) -> Liquidity {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn mint(&mut self, to: &AccountId, amount: Liquidity) -> Result<(), AmmError> {
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("LP supply overflow"))?;
        let balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("LP balance overflow"))?;
        self.total_supply = supply;
        self.balances.insert(*to, balance);
        Ok(())
    }

    fn burn(&mut self, from: &AccountId, amount: Liquidity) -> Result<(), AmmError> {
        let balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientLpBalance)?;
        let supply = self
            .total_supply
            .checked_sub(&amount)
            .ok_or(AmmError::Underflow("LP supply underflow"))?;
        self.total_supply = supply;
        self.balances.insert(*from, balance);
        Ok(())
    }
}
