//! Ordered pair of distinct pool assets.

use super::Token;
use crate::error::AmmError;

/// The two assets of a pool, canonically sorted by address.
///
/// Index `0` is always the token with the lower address.  Every
/// per-asset array in the engine (balances, scaling factors) uses this
/// indexing.
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::{Decimals, Token, TokenAddress, TokenPair};
///
/// let a = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// let b = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18).expect("valid"));
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.index_of(&a), Ok(0));
/// assert_eq!(pair.index_of(&b), Ok(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[Token; 2]", into = "[Token; 2]"))]
pub struct TokenPair {
    tokens: [Token; 2],
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both tokens share an address.
    pub fn new(token1: Token, token2: Token) -> Result<Self, AmmError> {
        if token1.address() == token2.address() {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        let tokens = if token1.address() < token2.address() {
            [token1, token2]
        } else {
            [token2, token1]
        };
        Ok(Self { tokens })
    }

    /// Returns the token at index 0 (lower address).
    #[must_use]
    pub const fn first(&self) -> Token {
        self.tokens[0]
    }

    /// Returns the token at index 1 (higher address).
    #[must_use]
    pub const fn second(&self) -> Token {
        self.tokens[1]
    }

    /// Returns both tokens in index order.
    #[must_use]
    pub const fn tokens(&self) -> [Token; 2] {
        self.tokens
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    /// Resolves a token to its pool index.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn index_of(&self, token: &Token) -> Result<usize, AmmError> {
        self.tokens
            .iter()
            .position(|t| t == token)
            .ok_or(AmmError::InvalidToken("token is not part of this pool"))
    }

    /// Returns the token at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTokenIndex`] if `index > 1`.
    pub fn token(&self, index: usize) -> Result<Token, AmmError> {
        self.tokens
            .get(index)
            .copied()
            .ok_or(AmmError::InvalidTokenIndex)
    }
}

impl TryFrom<[Token; 2]> for TokenPair {
    type Error = AmmError;

    fn try_from(value: [Token; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<TokenPair> for [Token; 2] {
    fn from(value: TokenPair) -> Self {
        value.tokens
    }
}
