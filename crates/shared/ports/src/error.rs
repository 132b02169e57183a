use agora_core::{AgentId, Good, Price, Quantity};
use thiserror::Error;

/// Which schedule an agent was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Value,
    Cost,
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleKind::Value => write!(f, "value"),
            ScheduleKind::Cost => write!(f, "cost"),
        }
    }
}

/// Malformed marginal schedule found while aggregating curves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Negative marginal {kind} {value} for unit {unit} of {good} (agent {agent})")]
    NegativeValue {
        agent: AgentId,
        good: Good,
        kind: ScheduleKind,
        unit: Quantity,
        value: Price,
    },

    #[error("Agent {agent} trades {good} but exposes no {kind} schedule")]
    MissingSchedule {
        agent: AgentId,
        good: Good,
        kind: ScheduleKind,
    },
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
