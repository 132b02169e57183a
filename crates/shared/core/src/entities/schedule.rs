use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// Per-unit valuation of a good for one agent
///
/// Unit `q` (1-based) is worth `values[q - 1]`. Buyers hold a marginal value
/// schedule (non-increasing), sellers a marginal cost schedule (non-decreasing).
/// Monotonicity is the producer's responsibility; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarginalSchedule {
    values: Vec<Price>,
}

impl MarginalSchedule {
    pub fn new(values: Vec<Price>) -> Self {
        Self { values }
    }

    /// Number of units the schedule covers
    pub fn num_units(&self) -> Quantity {
        self.values.len() as Quantity
    }

    /// Marginal value (or cost) of the `quantity`-th unit
    ///
    /// Returns `None` outside `1..=num_units`.
    pub fn get_value(&self, quantity: Quantity) -> Option<Price> {
        let idx = (quantity as usize).checked_sub(1)?;
        self.values.get(idx).copied()
    }

    pub fn values(&self) -> &[Price] {
        &self.values
    }

    /// True when each unit is worth no more than the previous one
    pub fn is_non_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] >= w[1])
    }

    /// True when each unit costs no less than the previous one
    pub fn is_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}
