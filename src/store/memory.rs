//! In-memory collection store, used in tests and as the ephemeral fallback.

use super::{Collection, StateStore};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Collection store backed by a process-local map. Contents do not survive
/// a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(collection.key()).cloned())
    }

    fn write(&self, collection: Collection, payload: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(collection.key(), payload.to_string());
        Ok(())
    }
}
