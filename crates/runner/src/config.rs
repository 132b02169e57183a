//! Configuration loading for market simulations
//!
//! JSON files describe the goods traded, the round loop and two populations
//! of zero-intelligence traders. Every field is optional; the defaults are
//! ten buyers and ten sellers trading apples for 1000 rounds.

use agora_core::{Good, Price, Quantity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Root configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Goods traded, in matching and reporting order
    #[serde(default = "default_goods")]
    pub goods: Vec<Good>,

    /// Round cap
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,

    /// Base RNG seed; the i-th agent built draws from `seed + i`
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// A bid crosses an ask when `bid + crossing_tolerance >= ask`
    #[serde(default)]
    pub crossing_tolerance: Decimal,

    /// Stop as soon as a round collects no orders at all
    #[serde(default = "default_stop_on_empty_round")]
    pub stop_on_empty_round: bool,

    #[serde(default = "ZiParams::buyers")]
    pub buyers: ZiParams,

    #[serde(default = "ZiParams::sellers")]
    pub sellers: ZiParams,
}

fn default_goods() -> Vec<Good> {
    vec![Good::new("apple")]
}

fn default_max_rounds() -> u64 {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_stop_on_empty_round() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            goods: default_goods(),
            max_rounds: default_max_rounds(),
            seed: default_seed(),
            crossing_tolerance: Decimal::ZERO,
            stop_on_empty_round: default_stop_on_empty_round(),
            buyers: ZiParams::buyers(),
            sellers: ZiParams::sellers(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goods.is_empty() {
            return Err(ConfigError::Invalid("goods list is empty".to_string()));
        }
        for (i, good) in self.goods.iter().enumerate() {
            if self.goods[..i].contains(good) {
                return Err(ConfigError::Invalid(format!("good {} listed twice", good)));
            }
        }
        if self.crossing_tolerance < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "crossing_tolerance {} is negative",
                self.crossing_tolerance
            )));
        }

        self.buyers.validate("buyers", &self.goods)?;
        self.sellers.validate("sellers", &self.goods)?;
        self.check_headroom()
    }

    /// Rejects runs whose quotes or running totals could overflow a `Decimal`
    fn check_headroom(&self) -> Result<(), ConfigError> {
        let too_large = || {
            ConfigError::Invalid(
                "base values, cash and unit counts are too large to account for".to_string(),
            )
        };

        let mut ceiling = Decimal::ZERO;
        for params in [&self.buyers, &self.sellers] {
            for base in params.base_values.values() {
                ceiling = ceiling.max(params.quote_ceiling(*base).ok_or_else(too_large)?);
            }
        }

        let units = self
            .buyers
            .total_units()
            .zip(self.sellers.total_units())
            .and_then(|(b, s)| b.checked_add(s))
            .and_then(|u| u.checked_mul(self.goods.len() as u64))
            .ok_or_else(too_large)?;
        let turnover = ceiling
            .checked_mul(Decimal::from(units))
            .and_then(|t| t.checked_mul(dec!(2)))
            .ok_or_else(too_large)?;

        self.buyers
            .initial_cash
            .max(self.sellers.initial_cash)
            .checked_add(turnover)
            .ok_or_else(too_large)?;
        Ok(())
    }
}

/// Template for a population of zero-intelligence traders
///
/// `base_values` are marginal values for buyers and marginal costs for
/// sellers; each agent draws its own schedule around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZiParams {
    #[serde(default = "default_count")]
    pub count: usize,

    #[serde(default)]
    pub initial_cash: Price,

    /// Units held at start, per good
    #[serde(default)]
    pub initial_goods: BTreeMap<Good, Quantity>,

    #[serde(default)]
    pub base_values: BTreeMap<Good, Price>,

    /// Length of each drawn schedule
    #[serde(default = "default_num_units")]
    pub num_units: Quantity,

    /// Schedule draws fall in `base * [1 - noise, 1 + noise]`
    #[serde(default = "default_noise_factor")]
    pub noise_factor: Decimal,

    /// Quotes stray at most this fraction away from the marginal value or cost
    #[serde(default = "default_max_relative_spread")]
    pub max_relative_spread: Decimal,
}

fn default_count() -> usize {
    10
}

fn default_num_units() -> Quantity {
    10
}

fn default_noise_factor() -> Decimal {
    dec!(0.1)
}

fn default_max_relative_spread() -> Decimal {
    dec!(0.2)
}

impl ZiParams {
    /// Ten apple buyers valuing units around 100, with 1000 cash each
    pub fn buyers() -> Self {
        Self {
            count: default_count(),
            initial_cash: dec!(1000),
            initial_goods: BTreeMap::new(),
            base_values: BTreeMap::from([(Good::new("apple"), dec!(100))]),
            num_units: default_num_units(),
            noise_factor: default_noise_factor(),
            max_relative_spread: default_max_relative_spread(),
        }
    }

    /// Ten apple sellers holding 10 units each, costing around 80
    pub fn sellers() -> Self {
        Self {
            count: default_count(),
            initial_cash: Decimal::ZERO,
            initial_goods: BTreeMap::from([(Good::new("apple"), 10)]),
            base_values: BTreeMap::from([(Good::new("apple"), dec!(80))]),
            num_units: default_num_units(),
            noise_factor: default_noise_factor(),
            max_relative_spread: default_max_relative_spread(),
        }
    }

    /// Highest price a schedule draw or quote can reach around `base`
    fn quote_ceiling(&self, base: Price) -> Option<Price> {
        base.checked_mul(Decimal::ONE + self.noise_factor)?
            .checked_mul(Decimal::ONE + self.max_relative_spread)
    }

    fn total_units(&self) -> Option<u64> {
        (self.count as u64).checked_mul(u64::from(self.num_units))
    }

    fn validate(&self, label: &str, goods: &[Good]) -> Result<(), ConfigError> {
        let fraction_ok = |x: Decimal| x >= Decimal::ZERO && x < Decimal::ONE;

        if self.count > 0 && self.num_units == 0 {
            return Err(ConfigError::Invalid(format!("{}: num_units must be positive", label)));
        }
        if !fraction_ok(self.noise_factor) {
            return Err(ConfigError::Invalid(format!(
                "{}: noise_factor {} outside [0, 1)",
                label, self.noise_factor
            )));
        }
        if !fraction_ok(self.max_relative_spread) {
            return Err(ConfigError::Invalid(format!(
                "{}: max_relative_spread {} outside [0, 1)",
                label, self.max_relative_spread
            )));
        }
        if self.initial_cash < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "{}: initial_cash {} is negative",
                label, self.initial_cash
            )));
        }
        for (good, base) in &self.base_values {
            if !goods.contains(good) {
                return Err(ConfigError::Invalid(format!(
                    "{}: base value for {}, which is not a listed good",
                    label, good
                )));
            }
            if *base < Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "{}: base value {} for {} is negative",
                    label, base, good
                )));
            }
            if self.quote_ceiling(*base).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{}: base value {} for {} is too large",
                    label, base, good
                )));
            }
        }
        Ok(())
    }
}
