//! Profile rule constants

use serde::{Deserialize, Serialize};

/// Tunable limits of the stat budget validator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRules {
    /// HP must be at least `floor(total × hp_min_ratio)`
    #[serde(default = "default_hp_min_ratio")]
    pub hp_min_ratio: f64,
    /// SPD lower bound as a share of the pool
    #[serde(default = "default_spd_min_ratio")]
    pub spd_min_ratio: f64,
    /// SPD upper bound as a share of the pool
    #[serde(default = "default_spd_max_ratio")]
    pub spd_max_ratio: f64,
    /// REF must be at least `floor(total × ref_min_ratio)`
    #[serde(default = "default_ref_min_ratio")]
    pub ref_min_ratio: f64,
    /// Required sum of the three resistance coefficients
    #[serde(default = "default_resistance_budget")]
    pub resistance_budget: f64,
}

impl Default for ProfileRules {
    fn default() -> Self {
        ProfileRules {
            hp_min_ratio: default_hp_min_ratio(),
            spd_min_ratio: default_spd_min_ratio(),
            spd_max_ratio: default_spd_max_ratio(),
            ref_min_ratio: default_ref_min_ratio(),
            resistance_budget: default_resistance_budget(),
        }
    }
}

impl ProfileRules {
    /// Resistance budget in whole hundredths
    pub fn resistance_budget_cents(&self) -> i64 {
        (self.resistance_budget * 100.0).round() as i64
    }
}

fn default_hp_min_ratio() -> f64 {
    0.2
}
fn default_spd_min_ratio() -> f64 {
    0.1
}
fn default_spd_max_ratio() -> f64 {
    0.6
}
fn default_ref_min_ratio() -> f64 {
    0.1
}
fn default_resistance_budget() -> f64 {
    3.0
}
