//! Buff aggregation - Percent modifiers first, fixed modifiers after
//!
//! Final value is calculated as:
//! `base × Π(1 + p_i / 100) + Σ f_i`
//!
//! Percent modifiers are applied one at a time in input order so that the
//! derivation trace reads the same way the numbers were combined.

use crate::input::{format_number, round_cents};
use crate::storage::CalcSnapshot;
use crate::types::Modifier;
use serde::{Deserialize, Serialize};

/// Outcome of aggregating buffs and debuffs onto a base value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffResult {
    /// Final value rounded to two decimals
    pub final_value: f64,
    /// Value after all percent modifiers, before fixed ones
    pub after_percent: f64,
    /// Derivation, e.g. `100 * (100 +50)% * (100 -50)% = 75.00 +10 -30 = 55.00`
    pub steps: String,
    /// The final value went below zero
    pub show_warning: bool,
}

/// Apply modifiers to `base`
pub fn aggregate(base: f64, modifiers: &[Modifier]) -> BuffResult {
    let mut value = base;
    let mut steps = format_number(base);

    if !modifiers.is_empty() {
        for modifier in modifiers {
            value *= 1.0 + modifier.percent / 100.0;
            let sign = if modifier.percent >= 0.0 { "+" } else { "" };
            steps.push_str(&format!(
                " * (100 {}{})%",
                sign,
                format_number(modifier.percent)
            ));
        }
        steps.push_str(&format!(" = {:.2}", round_cents(value)));
    }
    let after_percent = value;

    for modifier in modifiers {
        // Zero entries still count, they just add nothing worth showing
        if modifier.fixed != 0.0 {
            let sign = if modifier.fixed >= 0.0 { "+" } else { "" };
            steps.push_str(&format!(" {}{}", sign, format_number(modifier.fixed)));
        }
        value += modifier.fixed;
    }

    steps.push_str(&format!(" = {:.2}", round_cents(value)));

    BuffResult {
        final_value: round_cents(value),
        after_percent,
        steps,
        show_warning: value < 0.0,
    }
}

/// Aggregate the values of a saved calculator page
pub fn aggregate_snapshot(snapshot: &CalcSnapshot) -> BuffResult {
    aggregate(snapshot.base(), &snapshot.modifiers())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_modifiers() {
        let result = aggregate(100.0, &[]);
        assert!(approx(result.final_value, 100.0));
        assert_eq!(result.steps, "100 = 100.00");
        assert!(!result.show_warning);
    }

    #[test]
    fn test_percent_modifiers_multiply() {
        let result = aggregate(100.0, &[Modifier::new(50.0, 0.0), Modifier::new(-50.0, 0.0)]);
        // 100 * 1.5 * 0.5, not 100 * (1 + 0.5 - 0.5)
        assert!(approx(result.final_value, 75.0));
        assert_eq!(result.steps, "100 * (100 +50)% * (100 -50)% = 75.00 = 75.00");
    }

    #[test]
    fn test_fixed_applied_after_percent() {
        let modifiers = [
            Modifier::new(50.0, 0.0),
            Modifier::new(-50.0, 0.0),
            Modifier::new(0.0, 10.0),
            Modifier::new(0.0, -30.0),
        ];
        let result = aggregate(100.0, &modifiers);
        assert!(approx(result.after_percent, 75.0));
        assert!(approx(result.final_value, 55.0));
        assert_eq!(
            result.steps,
            "100 * (100 +50)% * (100 -50)% * (100 +0)% * (100 +0)% = 75.00 +10 -30 = 55.00"
        );
    }

    #[test]
    fn test_trace_has_one_equals_per_phase() {
        let modifiers = [Modifier::new(20.0, 5.0), Modifier::new(10.0, 0.0)];
        let result = aggregate(50.0, &modifiers);
        assert_eq!(result.steps.matches('=').count(), 2);
        // Zero fixed entry is skipped in the trace
        assert!(result.steps.ends_with("= 66.00 +5 = 71.00"));
    }

    #[test]
    fn test_negative_result_warns() {
        let result = aggregate(10.0, &[Modifier::new(0.0, -25.0)]);
        assert!(approx(result.final_value, -15.0));
        assert!(result.show_warning);
    }

    #[test]
    fn test_rounding() {
        let result = aggregate(10.0, &[Modifier::new(33.333, 0.0)]);
        assert!(approx(result.final_value, 13.33));
    }

    #[test]
    fn test_trace_rounds_ties_up() {
        let result = aggregate(0.125, &[]);
        assert!(approx(result.final_value, 0.13));
        assert_eq!(result.steps, "0.125 = 0.13");

        let result = aggregate(0.25, &[Modifier::new(-50.0, 0.0)]);
        assert_eq!(result.steps, "0.25 * (100 -50)% = 0.13 = 0.13");
    }
}
