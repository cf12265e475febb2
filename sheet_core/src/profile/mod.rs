//! Character profile - Stat budget, resistances, birth date and summary
//!
//! A profile is edited as raw text (see [`crate::storage::ProfileSnapshot`])
//! and read into the typed structs below whenever it is validated or
//! summarized.

mod builder;
mod explain;
mod form;
mod summary;
mod validator;

pub use builder::build_random_profile;
pub use explain::{ResistanceEffect, ResistanceTone};
pub use form::ProfileForm;
pub use summary::{summary_text, ProfileSummary, NOT_ENTERED};
pub use validator::{
    validate, validate_profile, validate_with, AllocationStatus, FieldMessage, ResistanceStatus,
    StatLimits, ValidationReport,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every editable field of the profile page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    Name,
    Day,
    Month,
    Year,
    Gender,
    Race,
    Bio,
    Class,
    Total,
    Hp,
    Spd,
    Ref,
    Pow,
    Def,
    Grd,
    Vit,
    Inf,
    Kinetic,
    Pressure,
    Force,
}

impl ProfileField {
    pub fn all() -> &'static [ProfileField] {
        use ProfileField::*;
        &[
            Name, Day, Month, Year, Gender, Race, Bio, Class, Total, Hp, Spd, Ref, Pow, Def, Grd,
            Vit, Inf, Kinetic, Pressure, Force,
        ]
    }

    /// Key used in the persisted snapshot
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Day => "day",
            ProfileField::Month => "month",
            ProfileField::Year => "year",
            ProfileField::Gender => "gender",
            ProfileField::Race => "race",
            ProfileField::Bio => "bio",
            ProfileField::Class => "class",
            ProfileField::Total => "total",
            ProfileField::Hp => "hp",
            ProfileField::Spd => "spd",
            ProfileField::Ref => "ref",
            ProfileField::Pow => "pow",
            ProfileField::Def => "def",
            ProfileField::Grd => "grd",
            ProfileField::Vit => "vit",
            ProfileField::Inf => "inf",
            ProfileField::Kinetic => "kinetic",
            ProfileField::Pressure => "pressure",
            ProfileField::Force => "force",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Day => "Birth day",
            ProfileField::Month => "Birth month",
            ProfileField::Year => "Birth year",
            ProfileField::Gender => "Gender",
            ProfileField::Race => "Race",
            ProfileField::Bio => "Biography",
            ProfileField::Class => "Class",
            ProfileField::Total => "Total stat",
            ProfileField::Hp => "HP",
            ProfileField::Spd => "SPD",
            ProfileField::Ref => "REF",
            ProfileField::Pow => "POW",
            ProfileField::Def => "DEF",
            ProfileField::Grd => "GRD",
            ProfileField::Vit => "VIT",
            ProfileField::Inf => "INF",
            ProfileField::Kinetic => "Kinetic",
            ProfileField::Pressure => "Pressure",
            ProfileField::Force => "Force",
        }
    }

    /// Select options for choice fields, `None` for free input
    pub fn options(&self) -> Option<&'static [SelectOption]> {
        match self {
            ProfileField::Gender => Some(GENDERS),
            ProfileField::Race => Some(RACES),
            ProfileField::Class => Some(CLASSES),
            _ => None,
        }
    }

    /// Whether the field holds a number
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            ProfileField::Name
                | ProfileField::Gender
                | ProfileField::Race
                | ProfileField::Bio
                | ProfileField::Class
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value/label pair of a choice field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const GENDERS: &[SelectOption] = &[
    SelectOption { value: "male", label: "Male" },
    SelectOption { value: "female", label: "Female" },
];

pub const RACES: &[SelectOption] = &[
    SelectOption { value: "human", label: "Human" },
    SelectOption { value: "spirit", label: "Spirit" },
    SelectOption { value: "angel", label: "Angel" },
];

pub const CLASSES: &[SelectOption] = &[
    SelectOption { value: "attacker", label: "Attacker" },
    SelectOption { value: "tanker", label: "Tanker" },
    SelectOption { value: "healer", label: "Healer" },
    SelectOption { value: "supporter", label: "Supporter" },
    SelectOption { value: "scouter", label: "Scouter" },
];

/// Display label for a select value; unknown values show as typed
pub fn option_label(options: &[SelectOption], value: &str) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}

/// Allocation of the stat pool across sub-stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatAllocation {
    pub total: i64,
    pub hp: i64,
    pub spd: i64,
    #[serde(rename = "ref")]
    pub reflex: i64,
    pub pow: i64,
    pub def: i64,
    pub grd: i64,
    pub vit: i64,
    pub inf: i64,
}

impl StatAllocation {
    /// Sum of all sub-stats, saturating at the `i64` bounds
    pub fn used(&self) -> i64 {
        [self.hp, self.spd, self.reflex, self.pow, self.def, self.grd, self.vit, self.inf]
            .into_iter()
            .fold(0i64, i64::saturating_add)
    }

    /// Points left in the pool; negative when over-allocated
    pub fn unused(&self) -> i64 {
        self.total.saturating_sub(self.used())
    }
}

/// Damage-taken coefficients per element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResistanceTriple {
    pub kinetic: f64,
    pub pressure: f64,
    pub force: f64,
}

impl ResistanceTriple {
    pub fn new(kinetic: f64, pressure: f64, force: f64) -> Self {
        ResistanceTriple { kinetic, pressure, force }
    }

    pub fn total(&self) -> f64 {
        self.kinetic + self.pressure + self.force
    }

    /// Total in whole hundredths, the precision the budget is checked at
    pub fn total_cents(&self) -> i64 {
        (self.total() * 100.0).round() as i64
    }
}
