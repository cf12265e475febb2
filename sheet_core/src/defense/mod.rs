//! Defense - What stands between an attack and the defender

mod resistance;

pub use resistance::{fixed_total, percent_chain, percent_factor, percent_reduction};

use crate::types::ResistanceEntry;
use serde::{Deserialize, Serialize};

/// Defense calculation constants
pub mod constants {
    /// Resistance multiplier used when the field is blank or zero
    pub const DEFAULT_MULTIPLIER: f64 = 1.0;

    /// Lowest multiplier true damage can be scaled by
    pub const MIN_TRUE_DAMAGE_MULTIPLIER: f64 = 1.0;
}

/// The defending side of a single attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    /// Resistance entries in input order
    #[serde(default)]
    pub resistances: Vec<ResistanceEntry>,
    /// Final damage scalar (elemental weakness or resistance)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Cancels the attacker's true damage
    #[serde(default)]
    pub anti_true: bool,
    /// Cancels the attacker's pierce damage
    #[serde(default)]
    pub anti_pierce: bool,
}

fn default_multiplier() -> f64 {
    constants::DEFAULT_MULTIPLIER
}

impl Default for Defense {
    fn default() -> Self {
        Defense {
            resistances: Vec::new(),
            multiplier: constants::DEFAULT_MULTIPLIER,
            anti_true: false,
            anti_pierce: false,
        }
    }
}

impl Defense {
    /// Create a defense with no resistances and a neutral multiplier
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resistance entry
    pub fn with_resistance(mut self, percent: f64, fixed: f64) -> Self {
        self.resistances.push(ResistanceEntry::new(percent, fixed));
        self
    }

    /// Set the resistance multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the anti-true and anti-pierce flags
    pub fn with_anti(mut self, anti_true: bool, anti_pierce: bool) -> Self {
        self.anti_true = anti_true;
        self.anti_pierce = anti_pierce;
        self
    }

    /// Combined percent factor of all entries
    pub fn percent_factor(&self) -> f64 {
        percent_factor(&self.resistances)
    }

    /// Sum of all fixed entries
    pub fn fixed_total(&self) -> f64 {
        fixed_total(&self.resistances)
    }

    /// Multiplier as applied to true damage (never below 1)
    pub fn true_damage_multiplier(&self) -> f64 {
        self.multiplier.max(constants::MIN_TRUE_DAMAGE_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_defense_is_neutral() {
        let defense = Defense::new();
        assert!((defense.multiplier - 1.0).abs() < f64::EPSILON);
        assert!((defense.percent_factor() - 1.0).abs() < f64::EPSILON);
        assert!(!defense.anti_true && !defense.anti_pierce);
    }

    #[test]
    fn test_true_damage_multiplier_floor() {
        let weak = Defense::new().with_multiplier(0.5);
        assert!((weak.true_damage_multiplier() - 1.0).abs() < f64::EPSILON);

        let strong = Defense::new().with_multiplier(2.0);
        assert!((strong.true_damage_multiplier() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let defense: Defense = serde_json::from_str(r#"{"anti_true": true}"#).unwrap();
        assert!(defense.anti_true);
        assert!((defense.multiplier - 1.0).abs() < f64::EPSILON);
        assert!(defense.resistances.is_empty());
    }
}
