//! Agora Core Domain
//!
//! Pure domain types for the Agora market-clearing engine.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod results;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Ask, Bid, MarginalSchedule, Side, Trade, TradeId};
pub use results::{EquilibriumResult, SurplusReport};
pub use values::{AgentId, Good, Price, Quantity};
