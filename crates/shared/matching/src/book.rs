use agora_core::{Good, Price};
use agora_ports::EconomicAgent;

/// An order waiting in one round's book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedOrder {
    /// Index of the posting agent in the agent slice
    pub agent_idx: usize,
    pub price: Price,
}

/// Bids and asks collected for one good in one round
///
/// Nothing survives the round: the next round collects a fresh book.
#[derive(Debug, Clone)]
pub struct RoundBook {
    good: Good,
    bids: Vec<QueuedOrder>,
    asks: Vec<QueuedOrder>,
}

impl RoundBook {
    pub fn new(good: Good) -> Self {
        Self {
            good,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Ask every agent for at most one bid and one ask per good
    ///
    /// Agents are polled in slice order and, per agent, goods in the given
    /// order. The returned books (one per good, same order) are sorted.
    pub fn collect(agents: &mut [Box<dyn EconomicAgent>], goods: &[Good]) -> Vec<RoundBook> {
        let mut books: Vec<RoundBook> = goods.iter().cloned().map(RoundBook::new).collect();

        for (agent_idx, agent) in agents.iter_mut().enumerate() {
            for book in books.iter_mut() {
                if let Some(bid) = agent.generate_bid(&book.good) {
                    book.push_bid(agent_idx, bid.price);
                }
                if let Some(ask) = agent.generate_ask(&book.good) {
                    book.push_ask(agent_idx, ask.price);
                }
            }
        }

        for book in books.iter_mut() {
            book.sort();
        }
        books
    }

    pub(crate) fn push_bid(&mut self, agent_idx: usize, price: Price) {
        self.bids.push(QueuedOrder { agent_idx, price });
    }

    pub(crate) fn push_ask(&mut self, agent_idx: usize, price: Price) {
        self.asks.push(QueuedOrder { agent_idx, price });
    }

    /// Highest bid first, lowest ask first
    ///
    /// Both sorts are stable, so equal prices keep collection order.
    pub(crate) fn sort(&mut self) {
        self.bids.sort_by(|a, b| b.price.cmp(&a.price));
        self.asks.sort_by(|a, b| a.price.cmp(&b.price));
    }

    pub fn good(&self) -> &Good {
        &self.good
    }

    pub fn bids(&self) -> &[QueuedOrder] {
        &self.bids
    }

    pub fn asks(&self) -> &[QueuedOrder] {
        &self.asks
    }
}
