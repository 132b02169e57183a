use agora_core::{EquilibriumResult, Good, Price, Quantity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::aggregator::AggregatedCurves;

/// Finds the competitive price and quantity on sorted curves
pub struct EquilibriumSolver;

impl EquilibriumSolver {
    /// Clearing price and quantity for sorted `demand` and `supply`
    ///
    /// Scans unit by unit and stops at the first unit whose marginal value is
    /// below its marginal cost; later crossings are not looked for. Price is
    /// the midpoint of the last clearing pair, or zero when nothing clears.
    pub fn solve(demand: &[Price], supply: &[Price]) -> (Price, Quantity) {
        let mut quantity: usize = 0;

        for (i, (value, cost)) in demand.iter().zip(supply).enumerate() {
            log::debug!("Unit {}: demand={}, supply={}", i + 1, value, cost);
            if value < cost {
                break;
            }
            quantity += 1;
        }

        if quantity == 0 {
            log::info!("No equilibrium found");
            return (Decimal::ZERO, 0);
        }

        let price = (demand[quantity - 1] + supply[quantity - 1]) / dec!(2);
        log::info!("Equilibrium at price {} with quantity {}", price, quantity);
        (price, quantity as Quantity)
    }

    /// Sum of `value - price` over the first `quantity` demand units
    pub fn buyer_surplus(demand: &[Price], price: Price, quantity: Quantity) -> Price {
        demand
            .iter()
            .take(quantity as usize)
            .map(|value| *value - price)
            .sum()
    }

    /// Sum of `price - cost` over the first `quantity` supply units
    pub fn seller_surplus(supply: &[Price], price: Price, quantity: Quantity) -> Price {
        supply
            .iter()
            .take(quantity as usize)
            .map(|cost| price - *cost)
            .sum()
    }

    /// Full equilibrium record for one good
    pub fn solve_curves(curves: &AggregatedCurves, good: &Good) -> EquilibriumResult {
        let (price, quantity) = Self::solve(&curves.demand, &curves.supply);
        if quantity == 0 {
            return EquilibriumResult::no_trade(good.clone());
        }

        let buyer_surplus = Self::buyer_surplus(&curves.demand, price, quantity);
        let seller_surplus = Self::seller_surplus(&curves.supply, price, quantity);

        EquilibriumResult {
            price,
            quantity,
            buyer_surplus,
            seller_surplus,
            total_surplus: buyer_surplus + seller_surplus,
            good_name: good.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_units_clear() {
        let demand = [dec!(150), dec!(140), dec!(130)];
        let supply = [dec!(100), dec!(110), dec!(120)];

        assert_eq!(EquilibriumSolver::solve(&demand, &supply), (dec!(125), 3));
    }

    #[test]
    fn test_stops_at_first_violation() {
        let demand = [dec!(150), dec!(90)];
        let supply = [dec!(100), dec!(140)];

        assert_eq!(EquilibriumSolver::solve(&demand, &supply), (dec!(125), 1));
    }

    #[test]
    fn test_later_crossings_are_not_scanned() {
        // Unsorted input: unit 3 would cross again, but the scan already stopped.
        let demand = [dec!(100), dec!(50), dec!(200)];
        let supply = [dec!(80), dec!(60), dec!(10)];

        assert_eq!(EquilibriumSolver::solve(&demand, &supply), (dec!(90), 1));
    }

    #[test]
    fn test_empty_side_means_no_equilibrium() {
        assert_eq!(
            EquilibriumSolver::solve(&[], &[dec!(50)]),
            (Decimal::ZERO, 0)
        );
        assert_eq!(
            EquilibriumSolver::solve(&[dec!(50)], &[]),
            (Decimal::ZERO, 0)
        );
    }

    #[test]
    fn test_no_crossing_means_no_equilibrium() {
        assert_eq!(
            EquilibriumSolver::solve(&[dec!(40)], &[dec!(50)]),
            (Decimal::ZERO, 0)
        );
    }

    #[test]
    fn test_equal_marginal_pair_clears() {
        assert_eq!(
            EquilibriumSolver::solve(&[dec!(50)], &[dec!(50)]),
            (dec!(50), 1)
        );
    }

    #[test]
    fn test_surplus_split() {
        let curves = AggregatedCurves {
            demand: vec![dec!(150), dec!(140), dec!(130)],
            supply: vec![dec!(100), dec!(110), dec!(120)],
        };

        let result = EquilibriumSolver::solve_curves(&curves, &Good::new("apple"));

        // (150 + 140 + 130) - 3 * 125 and 3 * 125 - (100 + 110 + 120)
        assert_eq!(result.buyer_surplus, dec!(45));
        assert_eq!(result.seller_surplus, dec!(45));
        assert_eq!(result.total_surplus, dec!(90));
        assert_eq!(result.good_name, Good::new("apple"));
    }

    #[test]
    fn test_surplus_of_no_trade_is_zero() {
        let curves = AggregatedCurves {
            demand: Vec::new(),
            supply: vec![dec!(50)],
        };

        let result = EquilibriumSolver::solve_curves(&curves, &Good::new("apple"));

        assert_eq!(result, EquilibriumResult::no_trade(Good::new("apple")));
        assert!(!result.has_equilibrium());
    }
}
