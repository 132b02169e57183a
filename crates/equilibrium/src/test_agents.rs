//! Schedule-only agents for unit tests

use agora_core::{AgentId, Ask, Bid, Good, MarginalSchedule, Price, Trade};
use agora_ports::EconomicAgent;
use rust_decimal::Decimal;

pub struct ScheduleAgent {
    id: AgentId,
    good: Good,
    buys: bool,
    sells: bool,
    values: Option<MarginalSchedule>,
    costs: Option<MarginalSchedule>,
}

impl ScheduleAgent {
    pub fn boxed_for(
        id: &str,
        good: Good,
        values: Option<&[Price]>,
        costs: Option<&[Price]>,
    ) -> Box<dyn EconomicAgent> {
        Box::new(Self {
            id: AgentId::new(id),
            good,
            buys: values.is_some(),
            sells: costs.is_some(),
            values: values.map(|v| MarginalSchedule::new(v.to_vec())),
            costs: costs.map(|c| MarginalSchedule::new(c.to_vec())),
        })
    }

    pub fn claiming_buyer_without_schedule(id: &str, good: Good) -> Box<dyn EconomicAgent> {
        Box::new(Self {
            id: AgentId::new(id),
            good,
            buys: true,
            sells: false,
            values: None,
            costs: None,
        })
    }
}

pub fn buyer(id: &str, values: &[Price]) -> Box<dyn EconomicAgent> {
    ScheduleAgent::boxed_for(id, Good::new("apple"), Some(values), None)
}

pub fn seller(id: &str, costs: &[Price]) -> Box<dyn EconomicAgent> {
    ScheduleAgent::boxed_for(id, Good::new("apple"), None, Some(costs))
}

impl EconomicAgent for ScheduleAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn is_buyer(&self, good: &Good) -> bool {
        self.buys && good == &self.good
    }

    fn is_seller(&self, good: &Good) -> bool {
        self.sells && good == &self.good
    }

    fn value_schedule(&self, good: &Good) -> Option<&MarginalSchedule> {
        self.values.as_ref().filter(|_| good == &self.good)
    }

    fn cost_schedule(&self, good: &Good) -> Option<&MarginalSchedule> {
        self.costs.as_ref().filter(|_| good == &self.good)
    }

    fn generate_bid(&mut self, _good: &Good) -> Option<Bid> {
        None
    }

    fn generate_ask(&mut self, _good: &Good) -> Option<Ask> {
        None
    }

    fn process_trade(&mut self, _trade: &Trade) -> bool {
        false
    }

    fn calculate_individual_surplus(&self) -> Price {
        Decimal::ZERO
    }
}
