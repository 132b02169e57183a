use agora_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decides whether a bid crosses an ask and at what price they trade
///
/// The default rule is the exact comparison `bid >= ask`. A positive tolerance
/// lets a bid that falls short of the ask by at most `tolerance` still cross;
/// the pair then trades at the midpoint, which sits below the ask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossingRule {
    tolerance: Price,
}

impl CrossingRule {
    /// Exact crossing, no tolerance
    pub fn exact() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Price) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Price {
        self.tolerance
    }

    pub fn crosses(&self, bid_price: Price, ask_price: Price) -> bool {
        bid_price + self.tolerance >= ask_price
    }

    /// Midpoint of the two quotes
    pub fn trade_price(&self, bid_price: Price, ask_price: Price) -> Price {
        (bid_price + ask_price) / dec!(2)
    }
}
