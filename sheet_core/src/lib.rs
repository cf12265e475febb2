//! sheet_core - Calculations behind role-play character sheets
//!
//! This library provides:
//! - Damage resolution: an attack against a stack of resistances
//! - Buff aggregation: percent and fixed modifiers onto a base value
//! - Profile validation: stat budget, resistance budget and birth date
//! - Profile summary, random builder and reset history
//! - Snapshot storage: persisting the raw text of each page

pub mod buff;
pub mod calendar;
pub mod combat;
pub mod config;
pub mod defense;
pub mod input;
pub mod prelude;
pub mod profile;
pub mod storage;
pub mod types;

// Re-export core types for convenience
pub use buff::{aggregate, BuffResult};
pub use calendar::{age_at_epoch, BirthDate};
pub use combat::{resolve_damage, Attack, DamageBranch, DamageResult};
pub use config::{default_config, ConfigError, ProfileRules, SheetConfig};
pub use defense::Defense;
pub use profile::{
    summary_text, validate, ProfileField, ProfileForm, ProfileSummary, ResistanceTriple,
    StatAllocation, ValidationReport,
};
pub use storage::{FileStore, MemoryStore, PageKey, SnapshotStore, StoreError};
pub use types::{DamageEffect, DamageElement, Modifier, ResistanceEntry, Severity};
