//! Token identity type.

use primitive_types::U256;

use super::{Decimals, TokenAddress};

/// A pool asset: its address plus native decimal precision.
///
/// Two tokens are equal only if both address and decimals match.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stableswap_engine::domain::{Decimals, Token, TokenAddress};
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// assert_eq!(usdc.scaling_factor(), U256::exp10(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Multiplier normalising this token's raw amounts to 18 decimals.
    #[must_use]
    pub fn scaling_factor(&self) -> U256 {
        self.decimals.scaling_factor()
    }
}
