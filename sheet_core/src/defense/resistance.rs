//! Resistance - Stacking of (percent, fixed) resistance entries
//!
//! Percent entries stack multiplicatively, one factor per entry:
//! `factor = Π (100 - p_i) / 100`
//!
//! Fixed entries stack additively:
//! `fixed = Σ f_i`
//!
//! The product is folded in input order. Multiplication is commutative, so
//! the order only matters for the last bits of floating point rounding.

use crate::input::format_number;
use crate::types::ResistanceEntry;

/// Combined damage multiplier from all percent resistances
///
/// An empty list yields 1.0 (no reduction).
pub fn percent_factor(entries: &[ResistanceEntry]) -> f64 {
    entries
        .iter()
        .fold(1.0, |acc, entry| acc * (100.0 - entry.percent) / 100.0)
}

/// Sum of all fixed resistances
pub fn fixed_total(entries: &[ResistanceEntry]) -> f64 {
    entries.iter().map(|entry| entry.fixed).sum()
}

/// Percentage of damage removed by percent resistances alone
pub fn percent_reduction(entries: &[ResistanceEntry]) -> f64 {
    (1.0 - percent_factor(entries)) * 100.0
}

/// Human readable chain of percent factors, e.g. `(100-50)% * (100-20)%`
///
/// Returns `1` when there is nothing to show.
pub fn percent_chain(entries: &[ResistanceEntry]) -> String {
    if entries.is_empty() {
        return "1".to_string();
    }
    entries
        .iter()
        .map(|entry| format!("(100-{})%", format_number(entry.percent)))
        .collect::<Vec<_>>()
        .join(" * ")
}
