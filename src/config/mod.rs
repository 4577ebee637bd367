//! Pool configuration structs.
//!
//! [`StableSwapConfig`] is the declarative blueprint a
//! [`StableSwapPool`](crate::pools::StableSwapPool) is built from;
//! [`FeeParameters`] is shared between creation and the
//! `set_fee_parameters` administrative operation.

mod fee;
mod stable_swap;

pub use fee::{FeeParameters, MAX_FEE_CAP};
pub use stable_swap::StableSwapConfig;
