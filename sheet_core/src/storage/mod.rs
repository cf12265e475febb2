//! Storage - Persisted page snapshots
//!
//! Each page saves its whole form after every change and restores it on
//! start. Loading never fails: absent pages, unreadable files and malformed
//! fields all fall back to the page defaults.

mod snapshot;
mod store;

pub use snapshot::{
    AntiFlags, AttackRecord, CalcSnapshot, DamageSnapshot, ProfileSnapshot, ResistanceRecord,
    MAX_ROWS,
};
pub use store::{
    merge_with_defaults, FileStore, MemoryStore, PageKey, PageSnapshot, SnapshotStore, StoreError,
};
