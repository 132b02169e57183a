use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Good, Price, Quantity};

/// Theoretical competitive equilibrium for one good
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    pub price: Price,
    pub quantity: Quantity,
    pub buyer_surplus: Price,
    pub seller_surplus: Price,
    /// Always `buyer_surplus + seller_surplus`
    pub total_surplus: Price,
    pub good_name: Good,
}

impl EquilibriumResult {
    /// Outcome for a market where no unit clears
    pub fn no_trade(good_name: Good) -> Self {
        Self {
            price: Decimal::ZERO,
            quantity: 0,
            buyer_surplus: Decimal::ZERO,
            seller_surplus: Decimal::ZERO,
            total_surplus: Decimal::ZERO,
            good_name,
        }
    }

    pub fn has_equilibrium(&self) -> bool {
        self.quantity > 0
    }
}

/// Run-level realized surplus against the theoretical optimum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurplusReport {
    pub total_buyer_surplus: Price,
    pub total_seller_surplus: Price,
    pub total_empirical_surplus: Price,
    /// Realized share of theoretical surplus, in percent; 0 when there is nothing to realize
    pub efficiency_percent: Decimal,
}
