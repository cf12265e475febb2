//! DamageResult - Outcome of damage resolution

use crate::input::format_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which damage formula was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageBranch {
    /// Percent resistance ignored, multiplier floored at 1
    True,
    /// Fixed resistance ignored
    Pierce,
    /// Percent, then fixed, then multiplier
    Normal,
}

impl DamageBranch {
    pub fn name(&self) -> &'static str {
        match self {
            DamageBranch::True => "True Damage",
            DamageBranch::Pierce => "Pierce Damage",
            DamageBranch::Normal => "Normal",
        }
    }
}

impl fmt::Display for DamageBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of resolving an attack against a defense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Final damage taken, rounded to two decimals
    pub damage: f64,
    /// Damage before rounding
    pub raw_damage: f64,
    /// Formula branch that was used
    pub branch: DamageBranch,
    /// Human readable derivation
    pub formula: String,
}

impl DamageResult {
    /// Whether the attack heals instead of hurting (negative damage)
    pub fn is_negative(&self) -> bool {
        self.damage < 0.0
    }

    /// Formula followed by the final figure
    pub fn summary(&self) -> String {
        format!("{} => {}", self.formula, format_number(self.damage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let result = DamageResult {
            damage: 25.0,
            raw_damage: 25.0,
            branch: DamageBranch::Normal,
            formula: "(100 * (100-50)% * (100-50)% - 0) * 1".to_string(),
        };
        assert_eq!(result.summary(), "(100 * (100-50)% * (100-50)% - 0) * 1 => 25");
        assert!(!result.is_negative());
    }

    #[test]
    fn test_branch_names() {
        assert_eq!(DamageBranch::True.to_string(), "True Damage");
        assert_eq!(DamageBranch::Pierce.to_string(), "Pierce Damage");
    }
}
