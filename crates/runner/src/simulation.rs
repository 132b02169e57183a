//! Market Simulation
//!
//! The round loop that ties agents, the matcher, the benchmark and the
//! accountant together. A simulation is single-use: `run` consumes it.

use agora_accounting::SurplusAccountant;
use agora_core::{EquilibriumResult, Good, Trade};
use agora_equilibrium::Equilibrium;
use agora_matching::{CrossingRule, DoubleAuctionMatcher, RoundOutcome};
use agora_ports::{EconomicAgent, ScheduleResult};
use rust_decimal::Decimal;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::report::SimulationReport;
use crate::zi_agent::ZiFactory;

/// Rounds between progress log lines
const PROGRESS_INTERVAL: u64 = 100;

/// Round-loop settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    pub max_rounds: u64,
    pub crossing_tolerance: Decimal,
    pub stop_on_empty_round: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            crossing_tolerance: Decimal::ZERO,
            stop_on_empty_round: true,
        }
    }
}

impl From<&SimulationConfig> for SimulationOptions {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
            crossing_tolerance: config.crossing_tolerance,
            stop_on_empty_round: config.stop_on_empty_round,
        }
    }
}

pub struct MarketSimulation {
    agents: Vec<Box<dyn EconomicAgent>>,
    goods: Vec<Good>,
    options: SimulationOptions,
    matcher: DoubleAuctionMatcher,
    equilibrium: Equilibrium,
}

impl MarketSimulation {
    /// Build the configured populations, buyers first
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut factory = ZiFactory::new(config.seed);
        let mut agents: Vec<Box<dyn EconomicAgent>> = Vec::new();
        for agent in factory.buyers(&config.buyers) {
            agents.push(Box::new(agent));
        }
        for agent in factory.sellers(&config.sellers) {
            agents.push(Box::new(agent));
        }

        log::info!(
            "Built {} buyers and {} sellers (seed {})",
            config.buyers.count,
            config.sellers.count,
            config.seed
        );

        let options = SimulationOptions::from(&config);
        Ok(Self::new(agents, config.goods, options))
    }

    pub fn new(
        agents: Vec<Box<dyn EconomicAgent>>,
        goods: Vec<Good>,
        options: SimulationOptions,
    ) -> Self {
        let rule = CrossingRule::with_tolerance(options.crossing_tolerance);
        Self {
            agents,
            equilibrium: Equilibrium::new(goods.clone()),
            goods,
            options,
            matcher: DoubleAuctionMatcher::new(rule),
        }
    }

    /// Trades recorded so far
    pub fn trades(&self) -> &[Trade] {
        self.matcher.trades()
    }

    pub fn rounds_completed(&self) -> u64 {
        self.matcher.rounds_completed()
    }

    /// Benchmark from the agents' current schedules, one result per good
    pub fn theoretical_equilibrium(&self) -> ScheduleResult<Vec<EquilibriumResult>> {
        self.equilibrium.calculate(&self.agents)
    }

    pub fn run_round(&mut self) -> RoundOutcome {
        self.matcher.run_round(&mut self.agents, &self.goods)
    }

    /// Benchmark, trade until done, then account
    pub fn run(mut self) -> Result<SimulationReport> {
        log::info!(
            "Starting simulation: {} agents, goods [{}], up to {} rounds",
            self.agents.len(),
            self.goods
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            self.options.max_rounds
        );

        let equilibria = self.theoretical_equilibrium()?;
        let theoretical_total_surplus = Equilibrium::theoretical_total_surplus(&equilibria);

        while self.rounds_completed() < self.options.max_rounds {
            let outcome = self.run_round();

            if outcome.round % PROGRESS_INTERVAL == 0 {
                log::info!(
                    "Round {}: {} trades so far",
                    outcome.round,
                    self.trades().len()
                );
            }
            if outcome.failed_settlements > 0 {
                log::debug!(
                    "Round {}: {} matches dropped at settlement",
                    outcome.round,
                    outcome.failed_settlements
                );
            }
            if self.options.stop_on_empty_round && outcome.is_idle() {
                log::info!("Round {}: no orders posted, stopping", outcome.round);
                break;
            }
        }

        let accountant = SurplusAccountant::new(self.goods.clone(), theoretical_total_surplus);
        let summary = accountant.report(&self.agents);
        let rounds_run = self.rounds_completed();

        log::info!(
            "Simulation complete: {} rounds, {} trades",
            rounds_run,
            self.trades().len()
        );

        Ok(SimulationReport::new(
            rounds_run,
            equilibria,
            theoretical_total_surplus,
            summary,
            self.matcher.into_trades(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZiParams;
    use crate::error::Error;
    use agora_core::{AgentId, Ask, Bid, MarginalSchedule, Price};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn one_unit(base: Price, cash: Price, held: u32) -> ZiParams {
        ZiParams {
            count: 1,
            initial_cash: cash,
            initial_goods: BTreeMap::from([(Good::new("apple"), held)]),
            base_values: BTreeMap::from([(Good::new("apple"), base)]),
            num_units: 1,
            noise_factor: Decimal::ZERO,
            max_relative_spread: Decimal::ZERO,
        }
    }

    fn single_pair_config() -> SimulationConfig {
        SimulationConfig {
            max_rounds: 50,
            buyers: one_unit(dec!(100), dec!(1000), 0),
            sellers: one_unit(dec!(80), Decimal::ZERO, 1),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_single_pair_trades_once_then_stops() {
        let report = MarketSimulation::from_config(single_pair_config())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.rounds_run, 2);
        assert_eq!(report.trades.len(), 1);
        assert_eq!(report.trades[0].price, dec!(90));
        assert_eq!(report.equilibria[0].price, dec!(90));
        assert_eq!(report.theoretical_total_surplus, dec!(20));
        assert_eq!(report.summary.total_buyer_surplus, dec!(10));
        assert_eq!(report.summary.total_seller_surplus, dec!(10));
        assert_eq!(report.summary.efficiency_percent, dec!(100));
    }

    #[test]
    fn test_runs_every_round_without_early_stop() {
        let config = SimulationConfig {
            stop_on_empty_round: false,
            max_rounds: 7,
            ..single_pair_config()
        };

        let report = MarketSimulation::from_config(config).unwrap().run().unwrap();

        assert_eq!(report.rounds_run, 7);
        assert_eq!(report.trades.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            goods: Vec::new(),
            ..SimulationConfig::default()
        };

        let result = MarketSimulation::from_config(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_huge_base_value_is_rejected_before_drawing() {
        let mut config = SimulationConfig::default();
        config.buyers.base_values.insert(Good::new("apple"), Decimal::MAX);

        let result = MarketSimulation::from_config(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    /// Claims to buy but has no schedule
    struct Opaque(AgentId);

    impl EconomicAgent for Opaque {
        fn id(&self) -> &AgentId {
            &self.0
        }
        fn is_buyer(&self, _good: &Good) -> bool {
            true
        }
        fn is_seller(&self, _good: &Good) -> bool {
            false
        }
        fn value_schedule(&self, _good: &Good) -> Option<&MarginalSchedule> {
            None
        }
        fn cost_schedule(&self, _good: &Good) -> Option<&MarginalSchedule> {
            None
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

    #[test]
    fn test_missing_schedule_fails_before_trading() {
        let sim = MarketSimulation::new(
            vec![Box::new(Opaque(AgentId::new("ghost")))],
            vec![Good::new("apple")],
            SimulationOptions::default(),
        );

        assert!(sim.theoretical_equilibrium().is_err());
        assert!(matches!(sim.run(), Err(Error::Schedule(_))));
    }

    #[test]
    fn test_benchmark_is_stable_across_calls() {
        let sim = MarketSimulation::from_config(SimulationConfig::default()).unwrap();

        let first = sim.theoretical_equilibrium().unwrap();
        let second = sim.theoretical_equilibrium().unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].quantity, 100);
    }
}
