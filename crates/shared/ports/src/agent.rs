use agora_core::{AgentId, Ask, Bid, Good, MarginalSchedule, Price, Trade};

/// Port for market participants
///
/// The engine only ever sees agents through this trait. How an agent decides
/// its bid or ask, or where it keeps its history, is up to the implementation.
/// Buyer-only, seller-only and dual-role traders are all just implementations.
pub trait EconomicAgent: Send {
    fn id(&self) -> &AgentId;

    fn is_buyer(&self, good: &Good) -> bool;

    fn is_seller(&self, good: &Good) -> bool;

    /// Marginal value schedule for a good this agent buys
    fn value_schedule(&self, good: &Good) -> Option<&MarginalSchedule>;

    /// Marginal cost schedule for a good this agent sells
    fn cost_schedule(&self, good: &Good) -> Option<&MarginalSchedule>;

    /// Bid for one unit this round, or `None` to sit the round out
    fn generate_bid(&mut self, good: &Good) -> Option<Bid>;

    /// Ask for one unit this round, or `None` to sit the round out
    fn generate_ask(&mut self, good: &Good) -> Option<Ask>;

    /// Settle a matched trade; `false` means the agent could not honor it
    ///
    /// Called exactly once per matched trade the agent is party to.
    fn process_trade(&mut self, trade: &Trade) -> bool;

    /// Cumulative realized surplus to date
    fn calculate_individual_surplus(&self) -> Price;
}
