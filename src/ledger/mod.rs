//! In-memory reference collaborators.
//!
//! [`InMemoryCustody`] and [`InMemoryLpLedger`] implement the boundary
//! traits without any external system, for tests, simulations and demos.

mod custody;
mod lp;

pub use custody::InMemoryCustody;
pub use lp::InMemoryLpLedger;
