use agora_core::{EquilibriumResult, Good, Price};
use agora_ports::{EconomicAgent, ScheduleResult};

use crate::aggregator::CurveAggregator;
use crate::solver::EquilibriumSolver;

/// Theoretical benchmark over a fixed list of goods
///
/// Every call recomputes from the agents it is given. Callers that want to
/// reuse a result keep it themselves and drop it when agent state changes.
#[derive(Debug, Clone)]
pub struct Equilibrium {
    goods: Vec<Good>,
}

impl Equilibrium {
    pub fn new(goods: Vec<Good>) -> Self {
        Self { goods }
    }

    /// One result per good, in goods order
    pub fn calculate(
        &self,
        agents: &[Box<dyn EconomicAgent>],
    ) -> ScheduleResult<Vec<EquilibriumResult>> {
        self.goods
            .iter()
            .map(|good| {
                log::info!("Calculating equilibrium for {}", good);
                let curves = CurveAggregator::aggregate(agents, good)?;
                Ok(EquilibriumSolver::solve_curves(&curves, good))
            })
            .collect()
    }

    /// Sum of total surplus across goods
    pub fn theoretical_total_surplus(results: &[EquilibriumResult]) -> Price {
        results.iter().map(|r| r.total_surplus).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_agents::{ScheduleAgent, buyer, seller};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_results_follow_goods_order() {
        let agents = vec![
            buyer("b1", &[dec!(150), dec!(140), dec!(130)]),
            seller("s1", &[dec!(100), dec!(110), dec!(120)]),
            ScheduleAgent::boxed_for("pb", Good::new("pear"), Some(&[dec!(20)]), None),
            ScheduleAgent::boxed_for("ps", Good::new("pear"), None, Some(&[dec!(10)])),
        ];
        let equilibrium = Equilibrium::new(vec![Good::new("pear"), Good::new("apple")]);

        let results = equilibrium.calculate(&agents).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].good_name, Good::new("pear"));
        assert_eq!(results[0].price, dec!(15));
        assert_eq!(results[0].total_surplus, dec!(10));
        assert_eq!(results[1].good_name, Good::new("apple"));
        assert_eq!(results[1].quantity, 3);
        assert_eq!(Equilibrium::theoretical_total_surplus(&results), dec!(100));
    }

    #[test]
    fn test_good_without_traders_has_no_equilibrium() {
        let agents = vec![buyer("b1", &[dec!(10)])];
        let equilibrium = Equilibrium::new(vec![Good::new("apple"), Good::new("plum")]);

        let results = equilibrium.calculate(&agents).unwrap();

        assert!(results.iter().all(|r| !r.has_equilibrium()));
        assert_eq!(Equilibrium::theoretical_total_surplus(&results), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_schedule_fails_whole_calculation() {
        let agents = vec![buyer("b1", &[dec!(-10)])];
        let equilibrium = Equilibrium::new(vec![Good::new("apple")]);

        assert!(equilibrium.calculate(&agents).is_err());
    }
}
