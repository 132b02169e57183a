use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{AgentId, Good, Price, Quantity};

/// Sequential trade identifier, starting at 1 for each run
pub type TradeId = u64;

/// One unit changing hands between a buyer and a seller
///
/// Created once per successful match and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub buyer_id: AgentId,
    pub seller_id: AgentId,
    /// Execution price (midpoint of bid and ask)
    pub price: Price,
    pub quantity: Quantity,
    pub good_name: Good,
    pub ask_price: Price,
    pub bid_price: Price,
}

impl Trade {
    /// Create a single-unit trade
    pub fn new(
        trade_id: TradeId,
        buyer_id: AgentId,
        seller_id: AgentId,
        good_name: Good,
        price: Price,
        bid_price: Price,
        ask_price: Price,
    ) -> Self {
        Self {
            trade_id,
            buyer_id,
            seller_id,
            price,
            quantity: 1,
            good_name,
            ask_price,
            bid_price,
        }
    }

    /// Which side of this trade the agent was on, if any
    ///
    /// A self-trade reports the buy side.
    pub fn side_of(&self, agent_id: &AgentId) -> Option<Side> {
        if &self.buyer_id == agent_id {
            Some(Side::Buy)
        } else if &self.seller_id == agent_id {
            Some(Side::Sell)
        } else {
            None
        }
    }
}
