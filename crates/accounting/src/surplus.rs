use agora_core::{Good, Price, Side, SurplusReport};
use agora_ports::EconomicAgent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Realized surplus as a percentage of theoretical surplus
///
/// Zero when the theoretical surplus is not positive, and never negative.
/// Saturates at `Decimal::MAX` when the ratio is not representable.
pub fn efficiency_percent(empirical: Price, theoretical: Price) -> Decimal {
    if theoretical <= Decimal::ZERO || empirical <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match empirical
        .checked_div(theoretical)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
    {
        Some(percent) => percent,
        None => {
            log::warn!(
                "Efficiency of {} over {} overflows; saturating",
                empirical,
                theoretical
            );
            Decimal::MAX
        }
    }
}

/// Aggregates agents' self-reported surplus into a run summary
#[derive(Debug, Clone)]
pub struct SurplusAccountant {
    goods: Vec<Good>,
    theoretical_total_surplus: Price,
}

impl SurplusAccountant {
    pub fn new(goods: Vec<Good>, theoretical_total_surplus: Price) -> Self {
        Self {
            goods,
            theoretical_total_surplus,
        }
    }

    /// Buyer if the agent buys any listed good, otherwise seller if it sells one
    pub fn role_of(&self, agent: &dyn EconomicAgent) -> Option<Side> {
        if self.goods.iter().any(|g| agent.is_buyer(g)) {
            Some(Side::Buy)
        } else if self.goods.iter().any(|g| agent.is_seller(g)) {
            Some(Side::Sell)
        } else {
            None
        }
    }

    pub fn report(&self, agents: &[Box<dyn EconomicAgent>]) -> SurplusReport {
        let mut total_buyer_surplus = Decimal::ZERO;
        let mut total_seller_surplus = Decimal::ZERO;

        for agent in agents {
            match self.role_of(agent.as_ref()) {
                Some(Side::Buy) => total_buyer_surplus += agent.calculate_individual_surplus(),
                Some(Side::Sell) => total_seller_surplus += agent.calculate_individual_surplus(),
                None => {
                    log::debug!("Agent {} trades none of the goods; not counted", agent.id());
                }
            }
        }

        let total_empirical_surplus = total_buyer_surplus + total_seller_surplus;
        let efficiency =
            efficiency_percent(total_empirical_surplus, self.theoretical_total_surplus);

        log::info!(
            "Empirical surplus: buyers {} sellers {} total {} ({}% of {})",
            total_buyer_surplus,
            total_seller_surplus,
            total_empirical_surplus,
            efficiency.round_dp(2),
            self.theoretical_total_surplus
        );

        SurplusReport {
            total_buyer_surplus,
            total_seller_surplus,
            total_empirical_surplus,
            efficiency_percent: efficiency,
        }
    }
}
