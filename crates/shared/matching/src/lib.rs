//! Agora Matching
//!
//! Round-based double auction: every round each agent may post one single-unit
//! bid and one single-unit ask per good, the book is sorted by price, and
//! crossing pairs are matched greedily from the top of the book.

mod book;
mod crossing;
mod double_auction;

pub use book::{QueuedOrder, RoundBook};
pub use crossing::CrossingRule;
pub use double_auction::{DoubleAuctionMatcher, RoundOutcome, RoundPhase};

// Re-export the agent port for convenience
pub use agora_ports::EconomicAgent;
