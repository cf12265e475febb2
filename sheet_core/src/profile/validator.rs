//! Stat budget validation
//!
//! Every rule is checked independently and reported against the field it
//! concerns, so one bad entry never hides another. The profile is valid
//! only when no rule makes it invalid.
//!
//! Two rules break the usual "warning means valid" pairing:
//! - unused stat points are reported as a warning but still invalidate
//! - a resistance total above the budget is a warning and stays valid,
//!   while a total below it is an error

use super::{ProfileField, ResistanceTriple, StatAllocation};
use crate::calendar::{days_in_month, BirthDate, EPOCH_DAY, EPOCH_MONTH, EPOCH_YEAR};
use crate::config::ProfileRules;
use crate::storage::ProfileSnapshot;
use crate::types::Severity;
use serde::{Deserialize, Serialize};

/// Bounds on the constrained sub-stats for a given pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLimits {
    pub hp_min: i64,
    pub spd_min: i64,
    pub spd_max: i64,
    pub ref_min: i64,
}

impl StatLimits {
    /// Limits under the default rules
    pub fn for_total(total: i64) -> Self {
        Self::with_rules(total, &ProfileRules::default())
    }

    pub fn with_rules(total: i64, rules: &ProfileRules) -> Self {
        StatLimits {
            hp_min: share(total, rules.hp_min_ratio),
            spd_min: share(total, rules.spd_min_ratio),
            spd_max: share(total, rules.spd_max_ratio),
            ref_min: share(total, rules.ref_min_ratio),
        }
    }

    /// Input hint for a constrained field
    pub fn help(&self, field: ProfileField) -> Option<String> {
        match field {
            ProfileField::Hp => Some(format!("HP ≥ {}", self.hp_min)),
            ProfileField::Spd => Some(format!("SPD {}-{}", self.spd_min, self.spd_max)),
            ProfileField::Ref => Some(format!("REF ≥ {}", self.ref_min)),
            _ => None,
        }
    }
}

fn share(total: i64, ratio: f64) -> i64 {
    (total as f64 * ratio).floor() as i64
}

/// How the pool compares to the sub-stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStatus {
    Exact,
    /// Points left over
    Under(i64),
    /// Points spent beyond the pool
    Over(i64),
}

/// How the resistance total compares to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResistanceStatus {
    Exact,
    Over,
    Under,
}

/// A message attached to one profile field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: ProfileField,
    pub severity: Severity,
    pub text: String,
}

impl FieldMessage {
    fn error(field: ProfileField, text: impl Into<String>) -> Self {
        FieldMessage {
            field,
            severity: Severity::Error,
            text: text.into(),
        }
    }

    fn warning(field: ProfileField, text: impl Into<String>) -> Self {
        FieldMessage {
            field,
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// Outcome of validating a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub limits: StatLimits,
    pub unused: i64,
    pub allocation_status: AllocationStatus,
    /// Sum of the resistances, to two decimals
    pub resistance_total: f64,
    pub resistance_status: ResistanceStatus,
    pub messages: Vec<FieldMessage>,
}

impl ValidationReport {
    pub fn message_for(&self, field: ProfileField) -> Option<&FieldMessage> {
        self.messages.iter().find(|m| m.field == field)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &FieldMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
    }

    /// Unused points line, e.g. `Unused: 5`
    pub fn unused_text(&self) -> String {
        match self.allocation_status {
            AllocationStatus::Exact => "All stat points allocated".to_string(),
            AllocationStatus::Under(n) => format!("Unused: {}", n),
            AllocationStatus::Over(_) => format!("Unused: {} (negative!)", self.unused),
        }
    }

    /// Resistance total line, e.g. `Total: 3.00`
    pub fn resistance_text(&self) -> String {
        format!("Total: {:.2}", self.resistance_total)
    }
}

/// Validate under the default rules
pub fn validate(
    allocation: &StatAllocation,
    resistances: &ResistanceTriple,
    birth: &BirthDate,
) -> ValidationReport {
    validate_with(allocation, resistances, birth, &ProfileRules::default())
}

/// Validate the current text of a profile page
pub fn validate_profile(snapshot: &ProfileSnapshot, rules: &ProfileRules) -> ValidationReport {
    validate_with(
        &snapshot.allocation(),
        &snapshot.resistances_or(0.0),
        &snapshot.birth_date(),
        rules,
    )
}

/// Validate against explicit rules
pub fn validate_with(
    allocation: &StatAllocation,
    resistances: &ResistanceTriple,
    birth: &BirthDate,
    rules: &ProfileRules,
) -> ValidationReport {
    let mut valid = true;
    let mut messages = Vec::new();
    let limits = StatLimits::with_rules(allocation.total, rules);

    if allocation.hp < limits.hp_min {
        messages.push(FieldMessage::error(
            ProfileField::Hp,
            format!("HP must be at least {}", limits.hp_min),
        ));
        valid = false;
    }

    if allocation.spd < limits.spd_min || allocation.spd > limits.spd_max {
        messages.push(FieldMessage::error(
            ProfileField::Spd,
            format!("SPD must be between {} and {}", limits.spd_min, limits.spd_max),
        ));
        valid = false;
    }

    if allocation.reflex < limits.ref_min {
        messages.push(FieldMessage::error(
            ProfileField::Ref,
            format!("REF must be at least {}", limits.ref_min),
        ));
        valid = false;
    }

    let unused = allocation.unused();
    let allocation_status = if unused < 0 {
        messages.push(FieldMessage::error(
            ProfileField::Total,
            format!("Over-allocated by {} points", unused.saturating_neg()),
        ));
        valid = false;
        AllocationStatus::Over(unused.saturating_neg())
    } else if unused > 0 {
        messages.push(FieldMessage::warning(
            ProfileField::Total,
            format!("{} points left to allocate", unused),
        ));
        valid = false;
        AllocationStatus::Under(unused)
    } else {
        AllocationStatus::Exact
    };

    let total_cents = resistances.total_cents();
    let budget_cents = rules.resistance_budget_cents();
    let resistance_status = if total_cents > budget_cents {
        messages.push(FieldMessage::warning(
            ProfileField::Force,
            format!("Resistance total is above {:.2}", rules.resistance_budget),
        ));
        ResistanceStatus::Over
    } else if total_cents < budget_cents {
        messages.push(FieldMessage::error(
            ProfileField::Force,
            format!("Resistance total is below {:.2}", rules.resistance_budget),
        ));
        valid = false;
        ResistanceStatus::Under
    } else {
        ResistanceStatus::Exact
    };

    if !birth.is_real_date() {
        let max_day = days_in_month(birth.year, birth.month);
        let text = if max_day == 0 {
            format!("Month {} does not exist", birth.month)
        } else {
            format!("Invalid day, month {} only has {} days", birth.month, max_day)
        };
        messages.push(FieldMessage::error(ProfileField::Day, text));
        valid = false;
    }

    if !birth.precedes_epoch() {
        messages.push(FieldMessage::error(
            ProfileField::Year,
            format!(
                "Birth date must be before {}/{}/{}",
                EPOCH_DAY, EPOCH_MONTH, EPOCH_YEAR
            ),
        ));
        valid = false;
    }

    ValidationReport {
        valid,
        limits,
        unused,
        allocation_status,
        resistance_total: total_cents as f64 / 100.0,
        resistance_status,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_allocation() -> StatAllocation {
        StatAllocation {
            total: 100,
            hp: 20,
            spd: 10,
            reflex: 10,
            pow: 30,
            def: 30,
            ..Default::default()
        }
    }

    fn neutral() -> ResistanceTriple {
        ResistanceTriple::new(1.0, 1.0, 1.0)
    }

    fn birth() -> BirthDate {
        BirthDate::new(950, 3, 10)
    }

    #[test]
    fn test_clean_profile_is_valid() {
        let report = validate(&clean_allocation(), &neutral(), &birth());
        assert!(report.valid, "unexpected messages: {:?}", report.messages);
        assert!(report.messages.is_empty());
        assert_eq!(report.allocation_status, AllocationStatus::Exact);
        assert_eq!(report.resistance_status, ResistanceStatus::Exact);
    }

    #[test]
    fn test_hp_boundary() {
        let report = validate(&clean_allocation(), &neutral(), &birth());
        assert!(report.message_for(ProfileField::Hp).is_none());

        let mut alloc = clean_allocation();
        alloc.hp = 19;
        alloc.pow = 31;
        let report = validate(&alloc, &neutral(), &birth());
        assert!(!report.valid);
        let msg = report.message_for(ProfileField::Hp).unwrap();
        assert_eq!(msg.severity, Severity::Error);
    }

    #[test]
    fn test_spd_range() {
        let mut alloc = clean_allocation();
        alloc.spd = 61;
        alloc.pow = 0;
        alloc.def = 0;
        alloc.total = 101;
        // total 101: spd 10..=60
        let report = validate(&alloc, &neutral(), &birth());
        assert!(report.message_for(ProfileField::Spd).is_some());
        assert!(!report.valid);
    }

    #[test]
    fn test_ref_minimum() {
        let mut alloc = clean_allocation();
        alloc.reflex = 9;
        alloc.pow = 31;
        let report = validate(&alloc, &neutral(), &birth());
        assert!(report.message_for(ProfileField::Ref).is_some());
    }

    #[test]
    fn test_under_allocation_is_warning_but_invalid() {
        let mut alloc = clean_allocation();
        alloc.def = 25;
        let report = validate(&alloc, &neutral(), &birth());
        assert!(!report.valid);
        assert_eq!(report.unused, 5);
        assert_eq!(report.allocation_status, AllocationStatus::Under(5));
        let msg = report.message_for(ProfileField::Total).unwrap();
        assert_eq!(msg.severity, Severity::Warning);
    }

    #[test]
    fn test_over_allocation_is_error() {
        let mut alloc = clean_allocation();
        alloc.def = 35;
        let report = validate(&alloc, &neutral(), &birth());
        assert!(!report.valid);
        assert_eq!(report.unused, -5);
        assert_eq!(report.allocation_status, AllocationStatus::Over(5));
        assert_eq!(
            report.message_for(ProfileField::Total).unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn test_resistance_over_budget_stays_valid() {
        let report = validate(
            &clean_allocation(),
            &ResistanceTriple::new(1.0, 1.0, 1.01),
            &birth(),
        );
        assert!(report.valid);
        assert_eq!(report.resistance_status, ResistanceStatus::Over);
        assert_eq!(
            report.message_for(ProfileField::Force).unwrap().severity,
            Severity::Warning
        );
        assert_eq!(report.resistance_text(), "Total: 3.01");
    }

    #[test]
    fn test_resistance_under_budget_is_invalid() {
        let report = validate(
            &clean_allocation(),
            &ResistanceTriple::new(1.0, 1.0, 0.99),
            &birth(),
        );
        assert!(!report.valid);
        assert_eq!(report.resistance_status, ResistanceStatus::Under);
    }

    #[test]
    fn test_resistance_compared_in_hundredths() {
        // 0.1 + 0.2 is not exactly 0.3 in binary
        let report = validate(
            &clean_allocation(),
            &ResistanceTriple::new(0.1, 0.2, 2.7),
            &birth(),
        );
        assert_eq!(report.resistance_status, ResistanceStatus::Exact);
    }

    #[test]
    fn test_day_out_of_range() {
        let report = validate(&clean_allocation(), &neutral(), &BirthDate::new(950, 2, 30));
        assert!(!report.valid);
        assert!(report.message_for(ProfileField::Day).is_some());

        let report = validate(&clean_allocation(), &neutral(), &BirthDate::new(950, 13, 1));
        assert!(report.message_for(ProfileField::Day).is_some());
    }

    #[test]
    fn test_epoch_boundary() {
        let report = validate(&clean_allocation(), &neutral(), &BirthDate::new(979, 7, 15));
        assert!(!report.valid);
        assert!(report.message_for(ProfileField::Year).is_some());

        let report = validate(&clean_allocation(), &neutral(), &BirthDate::new(979, 7, 14));
        assert!(report.valid);
    }

    #[test]
    fn test_rules_are_independent() {
        let alloc = StatAllocation {
            total: 100,
            ..Default::default()
        };
        let report = validate(&alloc, &ResistanceTriple::default(), &BirthDate::new(980, 1, 1));
        for field in [
            ProfileField::Hp,
            ProfileField::Spd,
            ProfileField::Ref,
            ProfileField::Total,
            ProfileField::Force,
            ProfileField::Year,
        ] {
            assert!(report.message_for(field).is_some(), "missing {:?}", field);
        }
        assert!(report.message_for(ProfileField::Day).is_none());
    }

    #[test]
    fn test_limits_and_help() {
        let limits = StatLimits::for_total(250);
        assert_eq!(limits.hp_min, 50);
        assert_eq!(limits.spd_min, 25);
        assert_eq!(limits.spd_max, 150);
        assert_eq!(limits.ref_min, 25);
        assert_eq!(limits.help(ProfileField::Spd).unwrap(), "SPD 25-150");
        assert!(limits.help(ProfileField::Pow).is_none());
    }

    #[test]
    fn test_custom_rules() {
        let rules = ProfileRules {
            hp_min_ratio: 0.3,
            ..Default::default()
        };
        let report = validate_with(&clean_allocation(), &neutral(), &birth(), &rules);
        assert!(!report.valid);
        assert_eq!(report.limits.hp_min, 30);
    }

    #[test]
    fn test_validate_profile_text() {
        let mut snapshot = ProfileSnapshot::default();
        for (field, value) in [
            (ProfileField::Total, "100"),
            (ProfileField::Hp, "20"),
            (ProfileField::Spd, "10"),
            (ProfileField::Ref, "10"),
            (ProfileField::Pow, "60"),
            (ProfileField::Kinetic, "1"),
            (ProfileField::Pressure, "1"),
            (ProfileField::Force, "1"),
            (ProfileField::Day, "1"),
            (ProfileField::Month, "1"),
            (ProfileField::Year, "900"),
        ] {
            snapshot.set(field, value);
        }
        let report = validate_profile(&snapshot, &ProfileRules::default());
        assert!(report.valid, "unexpected messages: {:?}", report.messages);
    }

    #[test]
    fn test_huge_hp_is_over_allocation() {
        let mut snapshot = ProfileSnapshot::default();
        snapshot.set(ProfileField::Total, "100");
        snapshot.set(ProfileField::Hp, "9223372036854775807");
        snapshot.set(ProfileField::Spd, "10");
        let report = validate_profile(&snapshot, &ProfileRules::default());
        assert!(!report.valid);
        assert_eq!(report.allocation_status, AllocationStatus::Over(i64::MAX - 100));
        assert!(report.message_for(ProfileField::Hp).is_none());

        snapshot.set(ProfileField::Total, "-9223372036854775808");
        let report = validate_profile(&snapshot, &ProfileRules::default());
        assert_eq!(report.allocation_status, AllocationStatus::Over(i64::MAX));
    }
}
