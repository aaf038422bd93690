//! Application facade tying the sheet adapter, the local store, and the
//! reconciliation engine together.
//!
//! Reads always re-fetch the sheet and re-read the store; there is no
//! caching of either across calls, so a write that completed before a
//! reload is guaranteed visible in that reload.

use crate::error::DataResult;
use crate::reconcile::reconcile;
use crate::router::WriteRouter;
use crate::sheet::SheetClient;
use crate::store::LocalStore;
use crate::types::{Record, RecordDraft};
use std::sync::Arc;
use tracing::info;

/// The record service the presentation layer talks to.
pub struct DataService {
    store: Arc<LocalStore>,
    sheet: SheetClient,
    router: WriteRouter,
}

impl DataService {
    pub fn new(store: Arc<LocalStore>, sheet: SheetClient) -> Self {
        let router = WriteRouter::new(Arc::clone(&store));
        Self {
            store,
            sheet,
            router,
        }
    }

    /// The full reconciled record set: remote snapshot (when reachable)
    /// merged with local additions, overrides, and tombstones.
    pub async fn load_all(&self) -> Vec<Record> {
        let remote = self.sheet.fetch().await;
        let local_new = self.store.local_records();
        let overrides = self.store.overrides();
        let tombstones = self.store.tombstones();

        let merged = reconcile(remote, &local_new, &overrides, &tombstones);
        info!(
            total = merged.len(),
            local = local_new.len(),
            "loaded record set"
        );
        merged
    }

    /// Whether the spreadsheet endpoint currently answers.
    pub async fn check_connection(&self) -> bool {
        self.sheet.check_connection().await
    }

    /// Create one record, validating against the current reconciled set.
    pub async fn add(&self, draft: RecordDraft) -> DataResult<Record> {
        let existing = self.load_all().await;
        self.router.add(draft, &existing).await
    }

    /// Create a batch of records (bulk import path).
    pub async fn add_batch(&self, drafts: Vec<RecordDraft>) -> DataResult<Vec<Record>> {
        self.router.add_batch(drafts).await
    }

    /// Replace a record, routed by id namespace.
    pub async fn update(&self, record: Record) -> DataResult<()> {
        self.router.update(record).await
    }

    /// Delete a record, routed by id namespace.
    pub async fn delete(&self, id: &str) -> DataResult<()> {
        self.router.delete(id).await
    }
}
