//! Arithmetic, precision and curve solvers.
//!
//! All curve math runs on 256-bit unsigned integers ([`U256`]) with
//! balances normalised to 18 decimals.  Every fallible step returns an
//! [`AmmError`](crate::error::AmmError) instead of panicking.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `checked` | [`CheckedArithmetic`] for overflow-safe `U256` ops |
//! | `fixed_point` | [`PRECISION`]-scaled multiply / divide, decimal scaling |
//! | `invariant` | Newton solver for `D`, spot price |
//! | `swap` | Newton solver for the output balance `y` |
//!
//! [`U256`]: primitive_types::U256

mod checked;
mod fixed_point;
mod invariant;
mod swap;

pub use checked::{abs_diff, CheckedArithmetic};
pub use fixed_point::{
    div_down, div_up, mul_down, mul_up, scale_down, scale_up, to_u128, PRECISION,
};
pub use invariant::{
    calculate_invariant, solve_invariant, spot_price, validate_amplification, InvariantSolution,
    A_PRECISION, MAX_A, MAX_ITERATIONS,
};
pub use swap::{check_indices, get_y, solve_y};
