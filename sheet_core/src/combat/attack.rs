//! Attack - The incoming side of a damage calculation

use crate::types::{DamageEffect, DamageElement};
use serde::{Deserialize, Serialize};

/// A single incoming attack
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attack {
    /// Raw damage value
    pub value: f64,
    /// Damage element (descriptive only)
    #[serde(default)]
    pub element: DamageElement,
    /// Attacker checked true damage
    #[serde(default)]
    pub true_damage: bool,
    /// Attacker checked pierce damage
    #[serde(default)]
    pub pierce_damage: bool,
}

impl Attack {
    /// Create a plain attack with no effects
    pub fn new(value: f64) -> Self {
        Attack {
            value,
            ..Default::default()
        }
    }

    /// Set the damage element
    pub fn with_element(mut self, element: DamageElement) -> Self {
        self.element = element;
        self
    }

    /// Mark as true damage
    pub fn with_true_damage(mut self) -> Self {
        self.true_damage = true;
        self
    }

    /// Mark as pierce damage
    pub fn with_pierce_damage(mut self) -> Self {
        self.pierce_damage = true;
        self
    }

    /// Set effect flags from a list of effects
    pub fn with_effects(mut self, effects: &[DamageEffect]) -> Self {
        self.true_damage = effects.contains(&DamageEffect::TrueDamage);
        self.pierce_damage = effects.contains(&DamageEffect::PierceDamage);
        self
    }

    /// Effects checked on this attack, in display order
    pub fn effects(&self) -> Vec<DamageEffect> {
        let mut effects = Vec::new();
        if self.true_damage {
            effects.push(DamageEffect::TrueDamage);
        }
        if self.pierce_damage {
            effects.push(DamageEffect::PierceDamage);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_flags_round_trip() {
        let attack = Attack::new(10.0).with_effects(&[DamageEffect::PierceDamage]);
        assert!(!attack.true_damage);
        assert!(attack.pierce_damage);
        assert_eq!(attack.effects(), vec![DamageEffect::PierceDamage]);
    }

    #[test]
    fn test_builder() {
        let attack = Attack::new(50.0)
            .with_element(DamageElement::Force)
            .with_true_damage();
        assert_eq!(attack.element, DamageElement::Force);
        assert!(attack.true_damage);
        assert_eq!(attack.effects(), vec![DamageEffect::TrueDamage]);
    }
}
