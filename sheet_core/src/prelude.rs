//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageEffect, DamageElement, Modifier, ResistanceEntry, Severity};

// Calculators
pub use crate::buff::{aggregate, aggregate_snapshot, BuffResult};
pub use crate::combat::{resolve_damage, resolve_snapshot, Attack, DamageBranch, DamageResult};
pub use crate::defense::Defense;

// Profile
pub use crate::calendar::{age_at_epoch, days_in_month, is_leap_year, BirthDate};
pub use crate::profile::{
    build_random_profile, summary_text, validate, validate_profile, validate_with,
    AllocationStatus, ProfileField, ProfileForm, ProfileSummary, ResistanceEffect,
    ResistanceStatus, ResistanceTriple, StatAllocation, StatLimits, ValidationReport,
};

// Storage
pub use crate::storage::{
    AttackRecord, CalcSnapshot, DamageSnapshot, FileStore, MemoryStore, PageKey, ProfileSnapshot,
    ResistanceRecord, SnapshotStore, StoreError,
};

// Config
pub use crate::config::{default_config, ConfigError, ProfileRules, SheetConfig};
