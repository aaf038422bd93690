//! Write routing for add, update, and delete intents.
//!
//! The record id namespace decides where a write lands: local-namespaced
//! ids mutate the local-new collection directly, everything else is
//! remote-origin and gets shadowed (override) or suppressed (tombstone);
//! the sheet itself is never touched. Intents are async with a small
//! latency boundary but are not cancellable and carry no retry loop;
//! failures surface to the caller for resubmission.

use crate::error::{DataError, DataResult};
use crate::store::{LocalStore, now_ms};
use crate::types::{LOCAL_ID_PREFIX, Record, RecordDraft, is_local_id};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Simulated I/O latency at the write boundary.
const WRITE_LATENCY: Duration = Duration::from_millis(25);

/// Routes write intents to the correct local-store mutation.
pub struct WriteRouter {
    store: Arc<LocalStore>,
}

impl WriteRouter {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Create one record: validate, assign a fresh local-namespaced id and
    /// a locale-formatted creation timestamp, persist, return the result.
    ///
    /// `existing` is the caller's current reconciled snapshot, used for the
    /// duplicate-name check. Validation failures reject before any write.
    pub async fn add(&self, draft: RecordDraft, existing: &[Record]) -> DataResult<Record> {
        validate_draft(&draft, existing)?;
        tokio::time::sleep(WRITE_LATENCY).await;

        let record = draft.into_record(
            format!("{}{}", LOCAL_ID_PREFIX, now_ms()),
            local_timestamp(),
        );
        self.store.push_front(record.clone());
        info!(id = %record.id, "record added");
        Ok(record)
    }

    /// Create a batch of records as one collection write.
    ///
    /// All records in the batch share one creation instant; a secondary
    /// index suffix keeps their ids unique within the batch.
    pub async fn add_batch(&self, drafts: Vec<RecordDraft>) -> DataResult<Vec<Record>> {
        tokio::time::sleep(WRITE_LATENCY).await;

        let batch_instant = now_ms();
        let timestamp = local_timestamp();
        let records: Vec<Record> = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft.into_record(
                    format!("{}{}-{}", LOCAL_ID_PREFIX, batch_instant, index),
                    timestamp.clone(),
                )
            })
            .collect();

        self.store.push_front_many(&records);
        info!(count = records.len(), "batch added");
        Ok(records)
    }

    /// Replace a record. Local-namespaced ids are replaced in place within
    /// the local-new collection (no-op when absent); remote-origin ids are
    /// shadowed with an override, never mutated upstream.
    pub async fn update(&self, record: Record) -> DataResult<()> {
        tokio::time::sleep(WRITE_LATENCY).await;

        if record.is_local() {
            self.store.replace_local(&record);
        } else {
            info!(id = %record.id, "shadowing sheet record with override");
            self.store.save_override(&record);
        }
        Ok(())
    }

    /// Delete by id. Local-namespaced ids are removed permanently and must
    /// never leave a tombstone; remote-origin ids are tombstoned only.
    pub async fn delete(&self, id: &str) -> DataResult<()> {
        tokio::time::sleep(WRITE_LATENCY).await;

        if is_local_id(id) {
            self.store.remove_local(id);
        } else {
            info!(id = %id, "marking sheet record deleted");
            self.store.add_tombstone(id);
        }
        Ok(())
    }
}

/// Reject a draft missing required fields or duplicating an existing name.
/// The duplicate check applies on create only; edits go through `update`.
pub fn validate_draft(draft: &RecordDraft, existing: &[Record]) -> DataResult<()> {
    if draft.full_name.trim().is_empty() {
        return Err(DataError::missing_field("full_name"));
    }
    if draft.address.trim().is_empty() {
        return Err(DataError::missing_field("address"));
    }
    if draft.phone.trim().is_empty() {
        return Err(DataError::missing_field("phone"));
    }
    if existing.iter().any(|r| r.full_name == draft.full_name) {
        return Err(DataError::duplicate_name(&draft.full_name));
    }
    Ok(())
}

/// Locale-formatted creation timestamp for locally created records.
fn local_timestamp() -> String {
    chrono::Local::now().format("%-d/%-m/%Y %H:%M:%S").to_string()
}
