use serde::{Deserialize, Serialize};

use crate::values::{AgentId, Price};

/// Single-unit buy order for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub agent_id: AgentId,
    pub price: Price,
}

impl Bid {
    pub fn new(agent_id: AgentId, price: Price) -> Self {
        Self { agent_id, price }
    }
}

/// Single-unit sell order for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ask {
    pub agent_id: AgentId,
    pub price: Price,
}

impl Ask {
    pub fn new(agent_id: AgentId, price: Price) -> Self {
        Self { agent_id, price }
    }
}
