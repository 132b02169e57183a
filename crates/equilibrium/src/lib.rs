//! Agora Equilibrium - Theoretical Benchmark
//!
//! Computes the competitive equilibrium a market *should* reach, to compare
//! against what round-based trading actually achieves:
//!
//! - **Aggregator**: pools every agent's marginal schedules into one demand
//!   curve (sorted high to low) and one supply curve (sorted low to high)
//! - **Solver**: walks both curves until marginal value drops below marginal
//!   cost, prices the last clearing unit at the midpoint and sums surplus
//! - **Equilibrium**: runs both for a list of goods
//!
//! Nothing is cached: every call reads live agent state.

pub mod aggregator;
pub mod equilibrium;
pub mod solver;

pub use aggregator::{AggregatedCurves, CurveAggregator};
pub use equilibrium::Equilibrium;
pub use solver::EquilibriumSolver;

#[cfg(test)]
mod test_agents;
