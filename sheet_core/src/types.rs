//! Core types shared by the calculators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage element of an attack
///
/// Purely descriptive: the element never changes the damage formula, but it
/// is recorded with the attack so the sheet can show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageElement {
    #[default]
    None,
    Kinetic,
    Pressure,
    Force,
}

impl DamageElement {
    /// Get all damage elements
    pub fn all() -> &'static [DamageElement] {
        &[
            DamageElement::None,
            DamageElement::Kinetic,
            DamageElement::Pressure,
            DamageElement::Force,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DamageElement::None => "None",
            DamageElement::Kinetic => "Kinetic",
            DamageElement::Pressure => "Pressure",
            DamageElement::Force => "Force",
        }
    }

    /// Next element in selection order (wraps)
    pub fn next(&self) -> DamageElement {
        let all = Self::all();
        let idx = all.iter().position(|e| e == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Previous element in selection order (wraps)
    pub fn prev(&self) -> DamageElement {
        let all = Self::all();
        let idx = all.iter().position(|e| e == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for DamageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Special effect carried by an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageEffect {
    /// Ignores percent resistance
    #[serde(rename = "True Damage")]
    TrueDamage,
    /// Ignores fixed resistance
    #[serde(rename = "Pierce Damage")]
    PierceDamage,
}

impl DamageEffect {
    pub fn name(&self) -> &'static str {
        match self {
            DamageEffect::TrueDamage => "True Damage",
            DamageEffect::PierceDamage => "Pierce Damage",
        }
    }
}

/// A (percent, fixed) resistance pair on the defending side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResistanceEntry {
    /// Percent reduction, typically 0-100 (not clamped)
    pub percent: f64,
    /// Flat reduction
    pub fixed: f64,
}

impl ResistanceEntry {
    pub fn new(percent: f64, fixed: f64) -> Self {
        ResistanceEntry { percent, fixed }
    }

    /// Percent-only entry
    pub fn percent(percent: f64) -> Self {
        ResistanceEntry { percent, fixed: 0.0 }
    }

    /// Fixed-only entry
    pub fn fixed(fixed: f64) -> Self {
        ResistanceEntry { percent: 0.0, fixed }
    }
}

/// A (percent, fixed) buff or debuff
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Modifier {
    /// Percent change, negative for debuffs
    pub percent: f64,
    /// Flat change, applied after all percents
    pub fixed: f64,
}

impl Modifier {
    pub fn new(percent: f64, fixed: f64) -> Self {
        Modifier { percent, fixed }
    }
}

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_cycle() {
        assert_eq!(DamageElement::None.next(), DamageElement::Kinetic);
        assert_eq!(DamageElement::Force.next(), DamageElement::None);
        assert_eq!(DamageElement::None.prev(), DamageElement::Force);
    }

    #[test]
    fn test_effect_serializes_with_display_name() {
        let json = serde_json::to_string(&vec![DamageEffect::TrueDamage, DamageEffect::PierceDamage]).unwrap();
        assert_eq!(json, r#"["True Damage","Pierce Damage"]"#);
    }

    #[test]
    fn test_element_default_is_none() {
        let json = serde_json::to_string(&DamageElement::default()).unwrap();
        assert_eq!(json, r#""None""#);
    }
}
