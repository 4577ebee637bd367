//! Results of pool operations.

use core::fmt;

use primitive_types::U256;

use super::{Amount, Liquidity, Token};

/// The outcome of a swap, including the fee split.
///
/// # Invariants
///
/// - `protocol_fee <= fee < amount_in`.
/// - `amount_out` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    token_in: Token,
    token_out: Token,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    protocol_fee: Amount,
    fee_rate: u128,
    amplification: u128,
}

impl SwapOutcome {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        token_in: Token,
        token_out: Token,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        protocol_fee: Amount,
        fee_rate: u128,
        amplification: u128,
    ) -> Self {
        Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee,
            protocol_fee,
            fee_rate,
            amplification,
        }
    }

    /// Token sold to the pool.
    #[must_use]
    pub const fn token_in(&self) -> Token {
        self.token_in
    }

    /// Token bought from the pool.
    #[must_use]
    pub const fn token_out(&self) -> Token {
        self.token_out
    }

    /// Full input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output amount released to the caller.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Total fee charged on the input, in input-token units.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Portion of [`fee`](Self::fee) routed to the protocol receiver.
    pub const fn protocol_fee(&self) -> Amount {
        self.protocol_fee
    }

    /// Dynamic fee rate applied, scaled by [`PRECISION`](crate::math::PRECISION).
    #[must_use]
    pub const fn fee_rate(&self) -> u128 {
        self.fee_rate
    }

    /// Amplification (scaled by `A_PRECISION`) the swap was priced with.
    #[must_use]
    pub const fn amplification(&self) -> u128 {
        self.amplification
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap(in={}, out={}, fee={}, protocol_fee={})",
            self.amount_in, self.amount_out, self.fee, self.protocol_fee
        )
    }
}

/// The outcome of a liquidity deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityOutcome {
    amounts: [Amount; 2],
    lp_minted: Liquidity,
    invariant_before: U256,
    invariant_after: U256,
}

impl AddLiquidityOutcome {
    pub(crate) const fn new(
        amounts: [Amount; 2],
        lp_minted: Liquidity,
        invariant_before: U256,
        invariant_after: U256,
    ) -> Self {
        Self {
            amounts,
            lp_minted,
            invariant_before,
            invariant_after,
        }
    }

    /// Deposited amounts in index order.
    #[must_use]
    pub const fn amounts(&self) -> [Amount; 2] {
        self.amounts
    }

    /// LP shares to mint for the depositor.
    #[must_use]
    pub const fn lp_minted(&self) -> Liquidity {
        self.lp_minted
    }

    /// Invariant before the deposit (zero for an empty pool).
    #[must_use]
    pub const fn invariant_before(&self) -> U256 {
        self.invariant_before
    }

    /// Invariant after the deposit.
    #[must_use]
    pub const fn invariant_after(&self) -> U256 {
        self.invariant_after
    }
}

/// The outcome of a proportional withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityOutcome {
    amounts: [Amount; 2],
    lp_burned: Liquidity,
}

impl RemoveLiquidityOutcome {
    pub(crate) const fn new(amounts: [Amount; 2], lp_burned: Liquidity) -> Self {
        Self { amounts, lp_burned }
    }

    /// Withdrawn amounts in index order.
    #[must_use]
    pub const fn amounts(&self) -> [Amount; 2] {
        self.amounts
    }

    /// LP shares to burn from the holder.
    #[must_use]
    pub const fn lp_burned(&self) -> Liquidity {
        self.lp_burned
    }
}
