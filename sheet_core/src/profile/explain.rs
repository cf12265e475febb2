//! Resistance explanations
//!
//! A resistance coefficient `x` scales damage taken from one element:
//!
//! | x         | effect                              |
//! |-----------|-------------------------------------|
//! | `x > 1`   | damage amplified x times            |
//! | `x == 1`  | unchanged                           |
//! | `0 < x < 1` | reduced by `(1 - x) × 100` percent |
//! | `x == 0`  | immune                              |
//! | `x < 0`   | damage absorbed as HP at ratio `abs(x)` |

use crate::input::{format_number, round_cents};
use crate::types::DamageElement;
use serde::{Deserialize, Serialize};

/// Effect of one resistance coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResistanceEffect {
    Unchanged,
    /// Damage taken is multiplied by the factor
    Amplified(f64),
    /// Damage taken is reduced by this many percent
    Reduced(f64),
    Immune,
    /// Each point of damage heals this much HP
    Absorbed(f64),
}

/// How favourable an effect is for the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResistanceTone {
    Good,
    Reduced,
    Neutral,
    Bad,
}

impl ResistanceEffect {
    /// Classify a coefficient
    pub fn from_coefficient(x: f64) -> Self {
        if x == 1.0 {
            ResistanceEffect::Unchanged
        } else if x > 1.0 {
            ResistanceEffect::Amplified(round_cents(x))
        } else if x > 0.0 {
            ResistanceEffect::Reduced(round_cents((1.0 - x) * 100.0))
        } else if x == 0.0 {
            ResistanceEffect::Immune
        } else {
            ResistanceEffect::Absorbed(round_cents(x.abs()))
        }
    }

    pub fn tone(&self) -> ResistanceTone {
        match self {
            ResistanceEffect::Absorbed(_) | ResistanceEffect::Immune => ResistanceTone::Good,
            ResistanceEffect::Reduced(_) => ResistanceTone::Reduced,
            ResistanceEffect::Unchanged => ResistanceTone::Neutral,
            ResistanceEffect::Amplified(_) => ResistanceTone::Bad,
        }
    }

    /// Sentence describing the effect against `element`
    pub fn describe(&self, element: DamageElement) -> String {
        match self {
            ResistanceEffect::Unchanged => "Unchanged".to_string(),
            ResistanceEffect::Amplified(x) => {
                format!("{} damage taken x{}", element, format_number(*x))
            }
            ResistanceEffect::Reduced(pct) => {
                format!("{}% less {} damage taken", format_number(*pct), element)
            }
            ResistanceEffect::Immune => format!("Immune to {} damage", element),
            ResistanceEffect::Absorbed(ratio) => format!(
                "Absorbs {} damage as HP: 1 damage heals {} HP",
                element,
                format_number(*ratio)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(ResistanceEffect::from_coefficient(1.0), ResistanceEffect::Unchanged);
        assert_eq!(
            ResistanceEffect::from_coefficient(1.5),
            ResistanceEffect::Amplified(1.5)
        );
        assert_eq!(
            ResistanceEffect::from_coefficient(0.75),
            ResistanceEffect::Reduced(25.0)
        );
        assert_eq!(ResistanceEffect::from_coefficient(0.0), ResistanceEffect::Immune);
        assert_eq!(
            ResistanceEffect::from_coefficient(-0.5),
            ResistanceEffect::Absorbed(0.5)
        );
    }

    #[test]
    fn test_tones() {
        assert_eq!(ResistanceEffect::Immune.tone(), ResistanceTone::Good);
        assert_eq!(ResistanceEffect::Absorbed(1.0).tone(), ResistanceTone::Good);
        assert_eq!(ResistanceEffect::Reduced(10.0).tone(), ResistanceTone::Reduced);
        assert_eq!(ResistanceEffect::Unchanged.tone(), ResistanceTone::Neutral);
        assert_eq!(ResistanceEffect::Amplified(2.0).tone(), ResistanceTone::Bad);
    }

    #[test]
    fn test_describe() {
        let effect = ResistanceEffect::from_coefficient(0.4);
        assert_eq!(effect.describe(DamageElement::Kinetic), "60% less Kinetic damage taken");
        assert_eq!(
            ResistanceEffect::Immune.describe(DamageElement::Force),
            "Immune to Force damage"
        );
    }
}
