//! Agora Ports
//!
//! Port definitions (traits) for the Agora market-clearing engine.
//! These define the boundary between the engine and the agents it trades with.

mod agent;
mod error;

pub use agent::EconomicAgent;
pub use error::{ScheduleError, ScheduleKind, ScheduleResult};
