use serde::{Deserialize, Serialize};

/// Compounded population and income multiplier for the addressable market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    pub value: f64,
}

/// Direction the market is moving relative to the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    Contraction,
    Flat,
    Expansion,
}

impl MarketIndex {
    pub fn phase(&self) -> MarketPhase {
        if self.value < 1.0 {
            MarketPhase::Contraction
        } else if self.value > 1.0 {
            MarketPhase::Expansion
        } else {
            MarketPhase::Flat
        }
    }

    /// Signed change against a flat market, in percent.
    pub fn change_percent(&self) -> f64 {
        (self.value - 1.0) * 100.0
    }
}

/// Combine fractional population and income trends into one capacity factor.
///
/// No range checks: any pair of finite fractions yields a finite product.
pub fn market_capacity_index(population_change_rate: f64, income_change_rate: f64) -> MarketIndex {
    MarketIndex {
        value: (1.0 + population_change_rate) * (1.0 + income_change_rate),
    }
}
