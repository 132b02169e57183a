//! Agora Runner - Market Simulation
//!
//! Runs a population of zero-intelligence traders through the round-based
//! double auction and compares what they achieve with the competitive
//! equilibrium:
//!
//! - **Config**: JSON description of goods, rounds and populations
//! - **ZI Agent**: budget-constrained random traders and their factory
//! - **Simulation**: benchmark first, then rounds, then surplus accounting
//! - **Report**: serializable summary of a finished run

pub mod config;
pub mod error;
pub mod report;
pub mod simulation;
pub mod zi_agent;

// Re-export main types
pub use config::{SimulationConfig, ZiParams};
pub use error::{ConfigError, Error, Result};
pub use report::SimulationReport;
pub use simulation::{MarketSimulation, SimulationOptions};
pub use zi_agent::{ZiAgent, ZiFactory};
