use agora_core::{EquilibriumResult, Price, SurplusReport, Trade};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub rounds_run: u64,
    /// Benchmark per good, computed before any trading
    pub equilibria: Vec<EquilibriumResult>,
    pub theoretical_total_surplus: Price,
    pub summary: SurplusReport,
    /// Append-only trade log, in execution order
    pub trades: Vec<Trade>,
}

impl SimulationReport {
    pub fn new(
        rounds_run: u64,
        equilibria: Vec<EquilibriumResult>,
        theoretical_total_surplus: Price,
        summary: SurplusReport,
        trades: Vec<Trade>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            rounds_run,
            equilibria,
            theoretical_total_surplus,
            summary,
            trades,
        }
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
