//! Snapshot stores - Where page snapshots live between sessions

use super::snapshot::{CalcSnapshot, DamageSnapshot, ProfileSnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot store error
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// The pages that persist state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKey {
    Damage,
    Calc,
    Profile,
}

impl PageKey {
    pub fn all() -> &'static [PageKey] {
        &[PageKey::Damage, PageKey::Calc, PageKey::Profile]
    }

    /// Storage key of the page
    pub fn key(&self) -> &'static str {
        match self {
            PageKey::Damage => "damageData",
            PageKey::Calc => "calcData",
            PageKey::Profile => "profile",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A snapshot type bound to the page it is stored under
pub trait PageSnapshot: Serialize + DeserializeOwned + Default {
    const PAGE: PageKey;
}

impl PageSnapshot for DamageSnapshot {
    const PAGE: PageKey = PageKey::Damage;
}

impl PageSnapshot for CalcSnapshot {
    const PAGE: PageKey = PageKey::Calc;
}

impl PageSnapshot for ProfileSnapshot {
    const PAGE: PageKey = PageKey::Profile;
}

/// Key/value storage of raw snapshot JSON
///
/// Implementors only move JSON values around; typing and default merging
/// live in the provided methods.
pub trait SnapshotStore {
    /// Raw stored value, `None` when absent or unreadable
    fn read(&self, key: PageKey) -> Option<Value>;

    fn write(&mut self, key: PageKey, value: Value) -> Result<(), StoreError>;

    /// Remove the stored value; removing an absent key is not an error
    fn clear(&mut self, key: PageKey) -> Result<(), StoreError>;

    /// Persist a page snapshot
    fn save<T: PageSnapshot>(&mut self, snapshot: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(snapshot)?;
        self.write(T::PAGE, value)
    }

    /// Load a page snapshot, falling back to defaults field by field
    fn load<T: PageSnapshot>(&self) -> T
    where
        Self: Sized,
    {
        match self.read(T::PAGE) {
            Some(value) => merge_with_defaults(value),
            None => T::default(),
        }
    }
}

/// Overlay `loaded` on the default snapshot one top-level key at a time
///
/// Any key whose value does not deserialize keeps its default.
pub fn merge_with_defaults<T>(loaded: Value) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let fields = match loaded {
        Value::Object(fields) => fields,
        other => {
            log::warn!("Ignoring stored snapshot that is not an object: {}", other);
            return T::default();
        }
    };

    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, value) in fields {
        let previous = merged.insert(key.clone(), value);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(merged.clone())) {
            log::warn!("Stored field '{}' is malformed, using default: {}", key, e);
            match previous {
                Some(previous) => merged.insert(key, previous),
                None => merged.remove(&key),
            };
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// One `<key>.json` file per page under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: PageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.key()))
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: PageKey) -> Option<Value> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding malformed snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&mut self, key: PageKey, value: Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(&value)?;
        fs::write(self.path_for(key), content)?;
        Ok(())
    }

    fn clear(&mut self, key: PageKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<PageKey, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value as-is, bypassing snapshot typing
    pub fn insert_raw(&mut self, key: PageKey, value: Value) {
        self.values.insert(key, value);
    }

    pub fn contains(&self, key: PageKey) -> bool {
        self.values.contains_key(&key)
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: PageKey) -> Option<Value> {
        self.values.get(&key).cloned()
    }

    fn write(&mut self, key: PageKey, value: Value) -> Result<(), StoreError> {
        self.values.insert(key, value);
        Ok(())
    }

    fn clear(&mut self, key: PageKey) -> Result<(), StoreError> {
        self.values.remove(&key);
        Ok(())
    }
}
