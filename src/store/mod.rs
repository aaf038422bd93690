//! Local persistence for pending writes.
//!
//! Three logical collections absorb every write that cannot be pushed back
//! to the shared spreadsheet: locally created records, overrides shadowing
//! sheet rows, and tombstones suppressing deleted sheet rows. The backing
//! store is injectable; callers always go through [`LocalStore`], which
//! degrades to a no-op once the backend proves unavailable so missing
//! durable storage never becomes a crash.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::types::Record;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// The three named durable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Locally created records, newest first (JSON array of records).
    LocalRecords,
    /// Edits to sheet records, keyed by sheet id (JSON object id -> record).
    Overrides,
    /// Deleted sheet record ids (JSON array of strings).
    Tombstones,
}

impl Collection {
    /// Storage key. The `v2` suffix is part of the on-disk contract.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::LocalRecords => "waste_local_v2",
            Collection::Overrides => "waste_overrides_v2",
            Collection::Tombstones => "waste_deleted_v2",
        }
    }
}

/// A key-value backend holding one serialized payload per collection.
///
/// Implementations are synchronous; the whole payload is rewritten on every
/// mutation. Collections stay small (hundreds of records), so O(n) writes
/// are the accepted cost of keeping this layer trivial.
pub trait StateStore: Send + Sync {
    fn read(&self, collection: Collection) -> Result<Option<String>>;
    fn write(&self, collection: Collection, payload: &str) -> Result<()>;
}

/// Facade over a [`StateStore`] with degrade-to-noop failure semantics.
///
/// Availability is probed once at construction. Any later read or write
/// failure is logged and marks the store unavailable; reads then return
/// empty defaults and writes are dropped. Errors never reach callers, and
/// in-memory results already handed out are never rolled back.
pub struct LocalStore {
    inner: Box<dyn StateStore>,
    available: AtomicBool,
}

impl LocalStore {
    pub fn new(inner: Box<dyn StateStore>) -> Self {
        let available = match inner.read(Collection::LocalRecords) {
            Ok(_) => true,
            Err(err) => {
                warn!("local storage unavailable, running ephemeral: {err:#}");
                false
            }
        };
        Self {
            inner,
            available: AtomicBool::new(available),
        }
    }

    /// Ephemeral store for tests and for the storage-unavailable path.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn read_raw(&self, collection: Collection) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        match self.inner.read(collection) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key = collection.key(), "storage read failed: {err:#}");
                self.available.store(false, Ordering::Relaxed);
                None
            }
        }
    }

    fn write_raw(&self, collection: Collection, payload: String) {
        if !self.is_available() {
            return;
        }
        if let Err(err) = self.inner.write(collection, &payload) {
            warn!(key = collection.key(), "storage write failed: {err:#}");
            self.available.store(false, Ordering::Relaxed);
        }
    }

    fn read_json<T: serde::de::DeserializeOwned + Default>(&self, collection: Collection) -> T {
        let Some(payload) = self.read_raw(collection) else {
            return T::default();
        };
        match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = collection.key(), "corrupt collection payload: {err}");
                T::default()
            }
        }
    }

    fn write_json<T: serde::Serialize>(&self, collection: Collection, value: &T) {
        match serde_json::to_string(value) {
            Ok(payload) => self.write_raw(collection, payload),
            Err(err) => warn!(key = collection.key(), "serialize failed: {err}"),
        }
    }

    // --- Locally created records ---

    /// Locally created records, newest first.
    pub fn local_records(&self) -> Vec<Record> {
        self.read_json(Collection::LocalRecords)
    }

    pub fn set_local_records(&self, records: &[Record]) {
        self.write_json(Collection::LocalRecords, &records);
    }

    /// Prepend one record, keeping newest-first order.
    pub fn push_front(&self, record: Record) {
        let mut current = self.local_records();
        current.insert(0, record);
        self.set_local_records(&current);
    }

    /// Prepend a batch as one collection write, keeping batch order.
    pub fn push_front_many(&self, records: &[Record]) {
        let mut updated = records.to_vec();
        updated.extend(self.local_records());
        self.set_local_records(&updated);
    }

    /// Replace a local record in place. No-op when the id is not found.
    pub fn replace_local(&self, record: &Record) {
        let mut current = self.local_records();
        if let Some(slot) = current.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
            self.set_local_records(&current);
        }
    }

    /// Remove a local record permanently.
    pub fn remove_local(&self, id: &str) {
        let current = self.local_records();
        let updated: Vec<Record> = current.into_iter().filter(|r| r.id != id).collect();
        self.set_local_records(&updated);
    }

    // --- Overrides (edits to sheet records) ---

    pub fn overrides(&self) -> HashMap<String, Record> {
        self.read_json(Collection::Overrides)
    }

    /// Store a full replacement for a sheet record, keyed by its id.
    pub fn save_override(&self, record: &Record) {
        let mut overrides = self.overrides();
        overrides.insert(record.id.clone(), record.clone());
        self.write_json(Collection::Overrides, &overrides);
    }

    // --- Tombstones (deleted sheet record ids) ---

    pub fn tombstones(&self) -> HashSet<String> {
        let ids: Vec<String> = self.read_json(Collection::Tombstones);
        ids.into_iter().collect()
    }

    /// Mark a sheet record deleted. Idempotent.
    pub fn add_tombstone(&self, id: &str) {
        let mut ids: Vec<String> = self.read_json(Collection::Tombstones);
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
            self.write_json(Collection::Tombstones, &ids);
        }
    }
}

/// Get the current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
