//! Profile summary - Derived figures and the exportable text sheet
//!
//! Derived figures:
//! - real HP = hp × 8
//! - HP regen cap per turn = hp × 2
//! - skill range = total × 0.5 metres, one decimal
//! - carry weight = (pow + 2) × 5 kg
//! - move speed = spd m/s, reaction speed = ref × 2
//! - push resistance = def × 5 kg, shield push resistance = grd × 5 kg

use super::explain::ResistanceEffect;
use super::{option_label, ProfileField, ResistanceTriple, StatAllocation};
use crate::calendar::age_at_epoch;
use crate::input::{format_number, round_tenths};
use crate::storage::ProfileSnapshot;
use crate::types::DamageElement;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Placeholder for fields left blank
pub const NOT_ENTERED: &str = "(not entered)";

/// Everything the summary panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub day: String,
    pub month: String,
    pub year: String,
    /// `None` unless day, month and year were all entered
    pub age: Option<i64>,
    pub gender: String,
    pub race: String,
    pub class: String,
    pub bio: String,
    pub stats: StatAllocation,
    pub real_hp: i64,
    pub hp_per_turn: i64,
    pub skill_range: f64,
    pub carry_weight: i64,
    pub move_speed: i64,
    pub reaction_speed: i64,
    /// Only when DEF > 0
    pub push_resistance: Option<i64>,
    /// Only when GRD > 0
    pub shield_push_resistance: Option<i64>,
    pub resistances: ResistanceTriple,
}

fn or_not_entered(text: &str) -> String {
    if text.is_empty() {
        NOT_ENTERED.to_string()
    } else {
        text.to_string()
    }
}

fn select_display(snapshot: &ProfileSnapshot, field: ProfileField) -> String {
    let value = snapshot.get(field);
    field
        .options()
        .and_then(|options| option_label(options, value))
        .map(str::to_string)
        .unwrap_or_else(|| or_not_entered(value))
}

impl ProfileSummary {
    pub fn from_snapshot(snapshot: &ProfileSnapshot) -> Self {
        let stats = snapshot.allocation();

        ProfileSummary {
            name: or_not_entered(&snapshot.name),
            day: or_not_entered(&snapshot.day),
            month: or_not_entered(&snapshot.month),
            year: or_not_entered(&snapshot.year),
            age: snapshot.entered_birth_date().map(|d| age_at_epoch(&d)),
            gender: select_display(snapshot, ProfileField::Gender),
            race: select_display(snapshot, ProfileField::Race),
            class: select_display(snapshot, ProfileField::Class),
            bio: or_not_entered(&snapshot.bio),
            stats,
            real_hp: stats.hp.saturating_mul(8),
            hp_per_turn: stats.hp.saturating_mul(2),
            skill_range: round_tenths(stats.total as f64 * 0.5),
            carry_weight: stats.pow.saturating_add(2).saturating_mul(5),
            move_speed: stats.spd,
            reaction_speed: stats.reflex.saturating_mul(2),
            push_resistance: (stats.def > 0).then(|| stats.def.saturating_mul(5)),
            shield_push_resistance: (stats.grd > 0).then(|| stats.grd.saturating_mul(5)),
            resistances: snapshot.resistances_or_neutral(),
        }
    }

    /// Age text, or the placeholder
    pub fn age_text(&self) -> String {
        self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| NOT_ENTERED.to_string())
    }

    /// Optional sub-stats that are above zero
    pub fn optional_stats(&self) -> Vec<(&'static str, i64)> {
        [
            ("POW", self.stats.pow),
            ("DEF", self.stats.def),
            ("GRD", self.stats.grd),
            ("VIT", self.stats.vit),
            ("INF", self.stats.inf),
        ]
        .into_iter()
        .filter(|(_, v)| *v > 0)
        .collect()
    }

    /// Each element with its coefficient and effect
    pub fn resistance_effects(&self) -> [(DamageElement, f64, ResistanceEffect); 3] {
        let r = &self.resistances;
        [
            (DamageElement::Kinetic, r.kinetic, ResistanceEffect::from_coefficient(r.kinetic)),
            (DamageElement::Pressure, r.pressure, ResistanceEffect::from_coefficient(r.pressure)),
            (DamageElement::Force, r.force, ResistanceEffect::from_coefficient(r.force)),
        ]
    }

    /// Plain-text rendering for copy and export
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut text);
        text
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Basic information")?;
        writeln!(out, "Name: {}", self.name)?;
        writeln!(
            out,
            "Birth date: {}/{}/{} (Age: {})",
            self.day,
            self.month,
            self.year,
            self.age_text()
        )?;
        writeln!(out, "Gender: {}", self.gender)?;
        writeln!(out, "Race: {}", self.race)?;
        writeln!(out, "Class: {}", self.class)?;
        writeln!(out, "Biography: {}", self.bio)?;

        writeln!(out)?;
        writeln!(out, "Stats")?;
        writeln!(out, "Total stat: {}", self.stats.total)?;
        writeln!(out, "Real HP: {}", self.real_hp)?;
        writeln!(out, "SPD: {}", self.stats.spd)?;
        writeln!(out, "REF: {}", self.stats.reflex)?;
        for (name, value) in self.optional_stats() {
            writeln!(out, "{}: {}", name, value)?;
        }

        writeln!(out)?;
        writeln!(out, "Derived")?;
        writeln!(out, "Max skill and attack range: {} m", format_number(self.skill_range))?;
        writeln!(out, "Max HP regen per turn: {} HP/turn", self.hp_per_turn)?;
        writeln!(out, "Carry weight limit: {} kg", self.carry_weight)?;
        writeln!(out, "Max move speed: {} m/s", self.move_speed)?;
        writeln!(
            out,
            "Reaction speed: {} m/s ({} SPD)",
            self.reaction_speed, self.reaction_speed
        )?;
        if let Some(push) = self.push_resistance {
            writeln!(out, "Push resistance: {} kg", push)?;
        }
        if let Some(push) = self.shield_push_resistance {
            writeln!(out, "Shield push resistance: {} kg", push)?;
        }

        writeln!(out)?;
        writeln!(out, "Resistances")?;
        for (element, value, effect) in self.resistance_effects() {
            writeln!(out, "{}: {:.2} - {}", element, value, effect.describe(element))?;
        }
        Ok(())
    }
}

/// Plain-text summary of a profile page
pub fn summary_text(snapshot: &ProfileSnapshot) -> String {
    ProfileSummary::from_snapshot(snapshot).to_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProfileSnapshot {
        let mut snapshot = ProfileSnapshot::default();
        for (field, value) in [
            (ProfileField::Name, "Kael"),
            (ProfileField::Day, "16"),
            (ProfileField::Month, "7"),
            (ProfileField::Year, "950"),
            (ProfileField::Gender, "male"),
            (ProfileField::Class, "healer"),
            (ProfileField::Total, "125"),
            (ProfileField::Hp, "30"),
            (ProfileField::Spd, "20"),
            (ProfileField::Ref, "15"),
            (ProfileField::Pow, "40"),
            (ProfileField::Def, "20"),
            (ProfileField::Kinetic, "0.5"),
            (ProfileField::Pressure, "0"),
            (ProfileField::Force, "2.5"),
        ] {
            snapshot.set(field, value);
        }
        snapshot
    }

    #[test]
    fn test_derived_figures() {
        let summary = ProfileSummary::from_snapshot(&sample());
        assert_eq!(summary.real_hp, 240);
        assert_eq!(summary.hp_per_turn, 60);
        assert!((summary.skill_range - 62.5).abs() < 1e-9);
        assert_eq!(summary.carry_weight, 210);
        assert_eq!(summary.move_speed, 20);
        assert_eq!(summary.reaction_speed, 30);
        assert_eq!(summary.push_resistance, Some(100));
        assert_eq!(summary.shield_push_resistance, None);
    }

    #[test]
    fn test_huge_hp_saturates() {
        let mut snapshot = sample();
        snapshot.set(ProfileField::Hp, "2000000000000000000");
        let summary = ProfileSummary::from_snapshot(&snapshot);
        assert_eq!(summary.real_hp, i64::MAX);
        assert_eq!(summary.hp_per_turn, 4_000_000_000_000_000_000);

        snapshot.set(ProfileField::Hp, "9223372036854775807");
        snapshot.set(ProfileField::Def, "9223372036854775807");
        let summary = ProfileSummary::from_snapshot(&snapshot);
        assert_eq!(summary.hp_per_turn, i64::MAX);
        assert_eq!(summary.push_resistance, Some(i64::MAX));
        assert!(summary.to_text().contains("Real HP: 9223372036854775807"));
    }

    #[test]
    fn test_age_after_epoch_day() {
        let summary = ProfileSummary::from_snapshot(&sample());
        // Born after the 15th of month 7: one year short
        assert_eq!(summary.age, Some(28));
    }

    #[test]
    fn test_age_needs_all_parts() {
        let mut snapshot = sample();
        snapshot.set(ProfileField::Month, "");
        let summary = ProfileSummary::from_snapshot(&snapshot);
        assert_eq!(summary.age, None);
        assert_eq!(summary.age_text(), NOT_ENTERED);
        assert_eq!(summary.month, NOT_ENTERED);
    }

    #[test]
    fn test_select_labels_and_placeholders() {
        let summary = ProfileSummary::from_snapshot(&sample());
        assert_eq!(summary.gender, "Male");
        assert_eq!(summary.class, "Healer");
        assert_eq!(summary.race, NOT_ENTERED);
        assert_eq!(summary.bio, NOT_ENTERED);
    }

    #[test]
    fn test_zero_resistance_reads_neutral_in_summary() {
        let summary = ProfileSummary::from_snapshot(&sample());
        assert!((summary.resistances.pressure - 1.0).abs() < f64::EPSILON);
        let effects = summary.resistance_effects();
        assert_eq!(effects[0].2, ResistanceEffect::Reduced(50.0));
        assert_eq!(effects[1].2, ResistanceEffect::Unchanged);
        assert_eq!(effects[2].2, ResistanceEffect::Amplified(2.5));
    }

    #[test]
    fn test_summary_text() {
        let text = summary_text(&sample());
        assert!(text.contains("Name: Kael"));
        assert!(text.contains("Birth date: 16/7/950 (Age: 28)"));
        assert!(text.contains("POW: 40"));
        assert!(text.contains("DEF: 20"));
        assert!(!text.contains("GRD:"));
        assert!(text.contains("Max skill and attack range: 62.5 m"));
        assert!(text.contains("Push resistance: 100 kg"));
        assert!(!text.contains("Shield push resistance"));
        assert!(text.contains("Kinetic: 0.50 - 50% less Kinetic damage taken"));
        assert!(text.contains("Pressure: 1.00 - Unchanged"));
    }
}
