//! In-memory token custody.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, Token, TokenAddress};
use crate::error::AmmError;
use crate::traits::AssetCustody;

/// Per-account wallets plus a single pool vault, all held in memory.
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::{AccountId, Amount, Decimals, Token, TokenAddress};
/// use stableswap_engine::ledger::InMemoryCustody;
/// use stableswap_engine::traits::AssetCustody;
///
/// let usdc = Token::new(TokenAddress::from_bytes([1; 32]), Decimals::new(6).expect("ok"));
/// let alice = AccountId::from_bytes([7; 32]);
///
/// let mut custody = InMemoryCustody::new();
/// custody.credit(&alice, &usdc, Amount::new(500));
/// custody.transfer_in(&usdc, &alice, Amount::new(200)).expect("funded");
///
/// assert_eq!(custody.balance_of(&alice, &usdc), Amount::new(300));
/// assert_eq!(custody.vault_balance(&usdc), Amount::new(200));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCustody {
    wallets: BTreeMap<(AccountId, TokenAddress), Amount>,
    vault: BTreeMap<TokenAddress, Amount>,
}

impl InMemoryCustody {
    /// Creates empty custody.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `amount` of `token` into `account`'s wallet, saturating at
    /// `u128::MAX`.
    pub fn credit(&mut self, account: &AccountId, token: &Token, amount: Amount) {
        let slot = self.wallets.entry((*account, token.address())).or_default();
        *slot = slot.checked_add(&amount).unwrap_or(Amount::MAX);
    }

    /// Wallet balance of `account` in `token`.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId, token: &Token) -> Amount {
        self.wallets
            .get(&(*account, token.address()))
            .copied()
            .unwrap_or_default()
    }

    /// Amount of `token` held by the pool vault.
    #[must_use]
    pub fn vault_balance(&self, token: &Token) -> Amount {
        self.vault.get(&token.address()).copied().unwrap_or_default()
    }
}

impl AssetCustody for InMemoryCustody {
    fn transfer_in(&mut self, token: &Token, from: &AccountId, amount: Amount) -> Result<(), AmmError> {
        let key = (*from, token.address());
        let wallet = self.wallets.get(&key).copied().unwrap_or_default();
        let vault = self.vault_balance(token);

        let wallet_after = wallet
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient wallet balance"))?;
        let vault_after = vault
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("vault balance overflow"))?;

        self.wallets.insert(key, wallet_after);
        self.vault.insert(token.address(), vault_after);
        Ok(())
    }

    fn transfer_out(&mut self, token: &Token, to: &AccountId, amount: Amount) -> Result<(), AmmError> {
        let key = (*to, token.address());
        let wallet = self.wallets.get(&key).copied().unwrap_or_default();
        let vault = self.vault_balance(token);

        let vault_after = vault
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient vault balance"))?;
        let wallet_after = wallet
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("wallet balance overflow"))?;

        self.vault.insert(token.address(), vault_after);
        self.wallets.insert(key, wallet_after);
        Ok(())
    }
}
