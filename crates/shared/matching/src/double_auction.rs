use agora_core::{Good, Trade, TradeId};
use agora_ports::EconomicAgent;

use crate::book::RoundBook;
use crate::crossing::CrossingRule;

/// Where the matcher is within the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingOrders,
    Matching,
    RoundComplete,
}

/// What happened in one round, across all goods
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 1-based round number
    pub round: u64,
    pub bids_collected: usize,
    pub asks_collected: usize,
    /// Trades recorded this round, in execution order
    pub trades: Vec<Trade>,
    /// Matches dropped because a party refused settlement
    pub failed_settlements: usize,
}

impl RoundOutcome {
    fn new(round: u64) -> Self {
        Self {
            round,
            ..Default::default()
        }
    }

    /// No agent posted anything this round
    pub fn is_idle(&self) -> bool {
        self.bids_collected == 0 && self.asks_collected == 0
    }
}

/// Round-based double auction with single-unit orders
///
/// Owns the run's trade log and trade-id counter. Each round:
/// 1. collects at most one bid and one ask per agent per good,
/// 2. sorts bids descending and asks ascending (stable),
/// 3. walks both sides from the top, pairing the i-th bid with the i-th ask
///    while they cross, and stops at the first pair that does not.
///
/// A matched pair trades one unit at the midpoint. Both parties settle; the
/// trade is recorded only if both accept, otherwise the pair is dropped.
/// Either way both orders are consumed.
pub struct DoubleAuctionMatcher {
    rule: CrossingRule,
    next_trade_id: TradeId,
    trades: Vec<Trade>,
    phase: RoundPhase,
    rounds_completed: u64,
}

impl DoubleAuctionMatcher {
    pub fn new(rule: CrossingRule) -> Self {
        Self {
            rule,
            next_trade_id: 1,
            trades: Vec::new(),
            phase: RoundPhase::AwaitingOrders,
            rounds_completed: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn rounds_completed(&self) -> u64 {
        self.rounds_completed
    }

    /// Every trade recorded so far this run
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }

    /// Run one full round over `goods`
    pub fn run_round(
        &mut self,
        agents: &mut [Box<dyn EconomicAgent>],
        goods: &[Good],
    ) -> RoundOutcome {
        self.phase = RoundPhase::AwaitingOrders;
        let books = RoundBook::collect(agents, goods);
        self.match_books(books, agents)
    }

    /// Match already-collected books, one good after another
    ///
    /// `books` must have been collected from the same `agents` slice.
    pub(crate) fn match_books(
        &mut self,
        books: Vec<RoundBook>,
        agents: &mut [Box<dyn EconomicAgent>],
    ) -> RoundOutcome {
        self.phase = RoundPhase::Matching;
        let mut outcome = RoundOutcome::new(self.rounds_completed + 1);

        for book in &books {
            outcome.bids_collected += book.bids().len();
            outcome.asks_collected += book.asks().len();
            self.match_book(book, agents, &mut outcome);
        }

        self.rounds_completed += 1;
        self.phase = RoundPhase::RoundComplete;
        outcome
    }

    fn match_book(
        &mut self,
        book: &RoundBook,
        agents: &mut [Box<dyn EconomicAgent>],
        outcome: &mut RoundOutcome,
    ) {
        // Heads are always consumed together, so the i-th match is the i-th pair.
        for (bid, ask) in book.bids().iter().zip(book.asks()) {
            if !self.rule.crosses(bid.price, ask.price) {
                break;
            }

            let parties = agents
                .get(bid.agent_idx)
                .zip(agents.get(ask.agent_idx))
                .map(|(buyer, seller)| (buyer.id().clone(), seller.id().clone()));
            let Some((buyer_id, seller_id)) = parties else {
                log::warn!(
                    "Skipping {} match: agent index {} or {} out of range",
                    book.good(),
                    bid.agent_idx,
                    ask.agent_idx
                );
                continue;
            };

            let trade = Trade::new(
                self.next_trade_id,
                buyer_id,
                seller_id,
                book.good().clone(),
                self.rule.trade_price(bid.price, ask.price),
                bid.price,
                ask.price,
            );

            let buyer_ok = agents[bid.agent_idx].process_trade(&trade);
            let seller_ok = agents[ask.agent_idx].process_trade(&trade);

            if buyer_ok && seller_ok {
                log::debug!(
                    "Trade {}: {} buys {} from {} @ {} (bid {}, ask {})",
                    trade.trade_id,
                    trade.buyer_id,
                    trade.good_name,
                    trade.seller_id,
                    trade.price,
                    trade.bid_price,
                    trade.ask_price
                );
                self.next_trade_id += 1;
                self.trades.push(trade.clone());
                outcome.trades.push(trade);
            } else {
                log::debug!(
                    "Dropped match {} / {} on {}: settlement buyer={} seller={}",
                    trade.buyer_id,
                    trade.seller_id,
                    trade.good_name,
                    buyer_ok,
                    seller_ok
                );
                outcome.failed_settlements += 1;
            }
        }
    }
}

impl Default for DoubleAuctionMatcher {
    fn default() -> Self {
        Self::new(CrossingRule::exact())
    }
}
