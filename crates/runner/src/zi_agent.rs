//! Zero-Intelligence Trader
//!
//! A budget-constrained random trader (ZI-C). Quotes are drawn uniformly
//! between a limit and the agent's marginal value or cost, so it never bids
//! above value or asks below cost, but it has no strategy beyond that.
//!
//! Whether an agent buys or sells a good is a matter of which schedules it
//! holds; the same type serves both populations.

use agora_core::{AgentId, Ask, Bid, Good, MarginalSchedule, Price, Quantity, Side, Trade};
use agora_ports::EconomicAgent;
use rand::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::ZiParams;

/// Resolution of uniform draws (fractions of 1/10000)
const DRAW_STEPS: i64 = 10_000;

/// Uniform draw in `[low, high]`
fn draw_between(rng: &mut StdRng, low: Decimal, high: Decimal) -> Decimal {
    let fraction = Decimal::new(rng.gen_range(0..=DRAW_STEPS), 4);
    low + (high - low) * fraction
}

/// `count` marginal values around `base`, rounded to cents
fn draw_schedule(rng: &mut StdRng, base: Price, noise: Decimal, count: Quantity) -> Vec<Price> {
    let low = base * (Decimal::ONE - noise);
    let high = base * (Decimal::ONE + noise);
    (0..count)
        .map(|_| draw_between(rng, low, high).round_dp(2))
        .collect()
}

pub struct ZiAgent {
    id: AgentId,
    rng: StdRng,
    cash: Price,
    inventory: BTreeMap<Good, Quantity>,
    values: BTreeMap<Good, MarginalSchedule>,
    costs: BTreeMap<Good, MarginalSchedule>,
    bought: BTreeMap<Good, Quantity>,
    sold: BTreeMap<Good, Quantity>,
    max_relative_spread: Decimal,
    surplus: Price,
    ledger: Vec<Trade>,
}

impl ZiAgent {
    /// Buyer of every good in `params.base_values`
    pub fn buyer(id: AgentId, params: &ZiParams, seed: u64) -> Self {
        let mut agent = Self::empty(id, params, seed);
        for (good, base) in &params.base_values {
            let mut values =
                draw_schedule(&mut agent.rng, *base, params.noise_factor, params.num_units);
            values.sort_by(|a, b| b.cmp(a));
            agent.values.insert(good.clone(), MarginalSchedule::new(values));
        }
        agent
    }

    /// Seller of every good in `params.base_values`
    pub fn seller(id: AgentId, params: &ZiParams, seed: u64) -> Self {
        let mut agent = Self::empty(id, params, seed);
        for (good, base) in &params.base_values {
            let mut costs =
                draw_schedule(&mut agent.rng, *base, params.noise_factor, params.num_units);
            costs.sort();
            agent.costs.insert(good.clone(), MarginalSchedule::new(costs));
        }
        agent
    }

    fn empty(id: AgentId, params: &ZiParams, seed: u64) -> Self {
        Self {
            id,
            rng: StdRng::seed_from_u64(seed),
            cash: params.initial_cash,
            inventory: params.initial_goods.clone(),
            values: BTreeMap::new(),
            costs: BTreeMap::new(),
            bought: BTreeMap::new(),
            sold: BTreeMap::new(),
            max_relative_spread: params.max_relative_spread,
            surplus: Decimal::ZERO,
            ledger: Vec::new(),
        }
    }

    pub fn cash(&self) -> Price {
        self.cash
    }

    pub fn inventory(&self, good: &Good) -> Quantity {
        self.inventory.get(good).copied().unwrap_or(0)
    }

    pub fn units_bought(&self, good: &Good) -> Quantity {
        self.bought.get(good).copied().unwrap_or(0)
    }

    pub fn units_sold(&self, good: &Good) -> Quantity {
        self.sold.get(good).copied().unwrap_or(0)
    }

    /// Trades this agent settled, in settlement order
    pub fn trades(&self) -> &[Trade] {
        &self.ledger
    }

    /// Marginal value of the next unit to buy, if any remain
    fn next_value(&self, good: &Good) -> Option<Price> {
        self.values
            .get(good)?
            .get_value(self.units_bought(good) + 1)
    }

    /// Marginal cost of the next unit to sell, if one is held and costed
    fn next_cost(&self, good: &Good) -> Option<Price> {
        if self.inventory(good) == 0 {
            return None;
        }
        self.costs.get(good)?.get_value(self.units_sold(good) + 1)
    }

    fn settle_purchase(&mut self, trade: &Trade) -> bool {
        let Some(value) = self.next_value(&trade.good_name) else {
            return false;
        };
        if self.cash < trade.price {
            return false;
        }

        self.cash -= trade.price;
        *self.inventory.entry(trade.good_name.clone()).or_insert(0) += 1;
        *self.bought.entry(trade.good_name.clone()).or_insert(0) += 1;
        self.surplus += value - trade.price;
        true
    }

    fn settle_sale(&mut self, trade: &Trade) -> bool {
        let Some(cost) = self.next_cost(&trade.good_name) else {
            return false;
        };

        self.cash += trade.price;
        *self.inventory.entry(trade.good_name.clone()).or_insert(0) -= 1;
        *self.sold.entry(trade.good_name.clone()).or_insert(0) += 1;
        self.surplus += trade.price - cost;
        true
    }
}

impl EconomicAgent for ZiAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn is_buyer(&self, good: &Good) -> bool {
        self.values.contains_key(good)
    }

    fn is_seller(&self, good: &Good) -> bool {
        self.costs.contains_key(good)
    }

    fn value_schedule(&self, good: &Good) -> Option<&MarginalSchedule> {
        self.values.get(good)
    }

    fn cost_schedule(&self, good: &Good) -> Option<&MarginalSchedule> {
        self.costs.get(good)
    }

    fn generate_bid(&mut self, good: &Good) -> Option<Bid> {
        let value = self.next_value(good)?;
        if self.cash <= Decimal::ZERO {
            return None;
        }

        let floor = value * (Decimal::ONE - self.max_relative_spread);
        let price = draw_between(&mut self.rng, floor, value)
            .round_dp(2)
            .min(self.cash);
        if price <= Decimal::ZERO {
            return None;
        }
        Some(Bid::new(self.id.clone(), price))
    }

    fn generate_ask(&mut self, good: &Good) -> Option<Ask> {
        let cost = self.next_cost(good)?;

        let ceiling = cost * (Decimal::ONE + self.max_relative_spread);
        let price = draw_between(&mut self.rng, cost, ceiling).round_dp(2);
        Some(Ask::new(self.id.clone(), price))
    }

    fn process_trade(&mut self, trade: &Trade) -> bool {
        let settled = match trade.side_of(&self.id) {
            Some(Side::Buy) => self.settle_purchase(trade),
            Some(Side::Sell) => self.settle_sale(trade),
            None => false,
        };
        if settled {
            self.ledger.push(trade.clone());
        }
        settled
    }

    fn calculate_individual_surplus(&self) -> Price {
        self.surplus
    }
}

/// Builds populations with sequential ids and per-agent seeds
///
/// Seeds are handed out in build order across all populations, so building
/// buyers then sellers from the same config always yields the same agents.
#[derive(Debug, Clone)]
pub struct ZiFactory {
    base_seed: u64,
    built: u64,
}

impl ZiFactory {
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed,
            built: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.base_seed.wrapping_add(self.built);
        self.built += 1;
        seed
    }

    /// `buyer_0`, `buyer_1`, ...
    pub fn buyers(&mut self, params: &ZiParams) -> Vec<ZiAgent> {
        (0..params.count)
            .map(|i| {
                ZiAgent::buyer(AgentId::new(format!("buyer_{}", i)), params, self.next_seed())
            })
            .collect()
    }

    /// `seller_0`, `seller_1`, ...
    pub fn sellers(&mut self, params: &ZiParams) -> Vec<ZiAgent> {
        (0..params.count)
            .map(|i| {
                ZiAgent::seller(AgentId::new(format!("seller_{}", i)), params, self.next_seed())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn apple() -> Good {
        Good::new("apple")
    }

    /// One-good template with no noise, so schedules are flat at `base`
    fn flat_params(cash: Price, held: Quantity, base: Price, units: Quantity) -> ZiParams {
        ZiParams {
            count: 1,
            initial_cash: cash,
            initial_goods: BTreeMap::from([(apple(), held)]),
            base_values: BTreeMap::from([(apple(), base)]),
            num_units: units,
            noise_factor: Decimal::ZERO,
            max_relative_spread: dec!(0.2),
        }
    }

    fn flat_buyer(cash: Price, units: Quantity) -> ZiAgent {
        ZiAgent::buyer(AgentId::new("b"), &flat_params(cash, 0, dec!(100), units), 1)
    }

    fn flat_seller(held: Quantity, units: Quantity) -> ZiAgent {
        ZiAgent::seller(AgentId::new("s"), &flat_params(Decimal::ZERO, held, dec!(50), units), 2)
    }

    fn trade(buyer: &str, seller: &str, price: Price) -> Trade {
        Trade::new(
            1,
            AgentId::new(buyer),
            AgentId::new(seller),
            apple(),
            price,
            price,
            price,
        )
    }

    #[test]
    fn test_schedules_are_sorted_and_within_noise_band() {
        let params = ZiParams::buyers();
        let buyer = ZiAgent::buyer(AgentId::new("b"), &params, 7);
        let seller = ZiAgent::seller(AgentId::new("s"), &ZiParams::sellers(), 8);

        let values = buyer.value_schedule(&apple()).unwrap();
        assert_eq!(values.num_units(), 10);
        assert!(values.is_non_increasing());
        assert!(values.values().iter().all(|v| *v >= dec!(90) && *v <= dec!(110)));

        let costs = seller.cost_schedule(&apple()).unwrap();
        assert!(costs.is_non_decreasing());
        assert!(costs.values().iter().all(|c| *c >= dec!(72) && *c <= dec!(88)));

        assert!(buyer.is_buyer(&apple()) && !buyer.is_seller(&apple()));
        assert!(seller.is_seller(&apple()) && !seller.is_buyer(&apple()));
    }

    #[test]
    fn test_bids_stay_between_floor_and_value() {
        let mut buyer = flat_buyer(dec!(1000), 5);

        for _ in 0..200 {
            let bid = buyer.generate_bid(&apple()).unwrap();
            assert!(bid.price >= dec!(80) && bid.price <= dec!(100), "bid {}", bid.price);
            assert_eq!(bid.price, bid.price.round_dp(2));
        }
    }

    #[test]
    fn test_bid_is_capped_by_cash() {
        let mut buyer = flat_buyer(dec!(50), 5);
        assert_eq!(buyer.generate_bid(&apple()).unwrap().price, dec!(50));

        let mut broke = flat_buyer(Decimal::ZERO, 5);
        assert!(broke.generate_bid(&apple()).is_none());
    }

    #[test]
    fn test_asks_stay_between_cost_and_ceiling() {
        let mut seller = flat_seller(3, 5);

        for _ in 0..200 {
            let ask = seller.generate_ask(&apple()).unwrap();
            assert!(ask.price >= dec!(50) && ask.price <= dec!(60), "ask {}", ask.price);
        }
        assert!(seller.generate_bid(&apple()).is_none());
    }

    #[test]
    fn test_purchase_books_surplus_and_exhausts_schedule() {
        let mut buyer = flat_buyer(dec!(1000), 2);

        assert!(buyer.process_trade(&trade("b", "s", dec!(90))));
        assert!(buyer.process_trade(&trade("b", "s", dec!(95))));
        // Schedule exhausted
        assert!(!buyer.process_trade(&trade("b", "s", dec!(10))));

        assert_eq!(buyer.cash(), dec!(815));
        assert_eq!(buyer.inventory(&apple()), 2);
        assert_eq!(buyer.units_bought(&apple()), 2);
        assert_eq!(buyer.calculate_individual_surplus(), dec!(15));
        assert_eq!(buyer.trades().len(), 2);
        assert!(buyer.generate_bid(&apple()).is_none());
    }

    #[test]
    fn test_purchase_fails_without_cash() {
        let mut buyer = flat_buyer(dec!(40), 2);

        assert!(!buyer.process_trade(&trade("b", "s", dec!(40.01))));
        assert_eq!(buyer.cash(), dec!(40));
        assert!(buyer.trades().is_empty());
    }

    #[test]
    fn test_sale_needs_inventory() {
        let mut seller = flat_seller(1, 5);

        assert!(seller.process_trade(&trade("b", "s", dec!(55))));
        assert!(!seller.process_trade(&trade("b", "s", dec!(55))));

        assert_eq!(seller.cash(), dec!(55));
        assert_eq!(seller.inventory(&apple()), 0);
        assert_eq!(seller.units_sold(&apple()), 1);
        assert_eq!(seller.calculate_individual_surplus(), dec!(5));
        assert!(seller.generate_ask(&apple()).is_none());
    }

    #[test]
    fn test_trade_naming_neither_party_is_refused() {
        let mut buyer = flat_buyer(dec!(1000), 2);
        assert!(!buyer.process_trade(&trade("x", "y", dec!(1))));
    }

    #[test]
    fn test_factory_ids_and_seeds_are_deterministic() {
        let build = || {
            let mut factory = ZiFactory::new(42);
            let buyers = factory.buyers(&ZiParams::buyers());
            let sellers = factory.sellers(&ZiParams::sellers());
            (buyers, sellers)
        };
        let (buyers, sellers) = build();
        let (buyers_again, _) = build();

        assert_eq!(buyers.len(), 10);
        assert_eq!(buyers[0].id(), &AgentId::new("buyer_0"));
        assert_eq!(sellers[9].id(), &AgentId::new("seller_9"));
        assert_eq!(
            buyers[3].value_schedule(&apple()),
            buyers_again[3].value_schedule(&apple())
        );
        assert_ne!(
            buyers[0].value_schedule(&apple()),
            buyers[1].value_schedule(&apple())
        );
    }
}
