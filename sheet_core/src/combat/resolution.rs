//! Damage resolution - Apply an Attack to a Defense
//!
//! Exactly one formula applies, chosen in this order:
//!
//! 1. True damage: `(v - Σfixed) × max(r, 1)`
//! 2. Pierce damage: `v × Π((100 - p) / 100) × r`
//! 3. Normal: `(v × Π((100 - p) / 100) - Σfixed) × r`
//!
//! The defender's anti flags switch the matching attacker effect off before
//! the branch is chosen. The result is rounded half-up to two decimals.

use super::attack::Attack;
use super::result::{DamageBranch, DamageResult};
use crate::defense::{percent_chain, Defense};
use crate::input::{format_number, round_cents};
use crate::storage::DamageSnapshot;

/// Resolve one attack against one defense
pub fn resolve_damage(attack: &Attack, defense: &Defense) -> DamageResult {
    let branch = select_branch(attack, defense);
    let v = attack.value;
    let fixed = defense.fixed_total();

    let (raw_damage, formula) = match branch {
        DamageBranch::True => {
            let mult = defense.true_damage_multiplier();
            (
                (v - fixed) * mult,
                format!(
                    "({} - {}) * {}",
                    format_number(v),
                    format_number(fixed),
                    format_number(mult)
                ),
            )
        }
        DamageBranch::Pierce => (
            v * defense.percent_factor() * defense.multiplier,
            format!(
                "{} * {} * {}",
                format_number(v),
                percent_chain(&defense.resistances),
                format_number(defense.multiplier)
            ),
        ),
        DamageBranch::Normal => (
            (v * defense.percent_factor() - fixed) * defense.multiplier,
            format!(
                "({} * {} - {}) * {}",
                format_number(v),
                percent_chain(&defense.resistances),
                format_number(fixed),
                format_number(defense.multiplier)
            ),
        ),
    };

    log::debug!("resolved {} damage: {} = {:.4}", branch, formula, raw_damage);

    DamageResult {
        damage: round_cents(raw_damage),
        raw_damage,
        branch,
        formula,
    }
}

/// Pick the formula branch after anti flags are applied
///
/// True damage wins when both effects survive.
pub fn select_branch(attack: &Attack, defense: &Defense) -> DamageBranch {
    let has_true = attack.true_damage && !defense.anti_true;
    let has_pierce = attack.pierce_damage && !defense.anti_pierce;

    if has_true {
        DamageBranch::True
    } else if has_pierce {
        DamageBranch::Pierce
    } else {
        DamageBranch::Normal
    }
}

/// Resolve every attack of a saved damage page
pub fn resolve_snapshot(snapshot: &DamageSnapshot) -> Vec<DamageResult> {
    snapshot
        .normalized()
        .attacks
        .iter()
        .map(|record| resolve_damage(&record.attack(), &record.defense()))
        .collect()
}
