//! Mock stores for exercising failure paths

use async_trait::async_trait;
use demand_core::{Price, Submission};
use std::sync::Arc;
use survey_service::{MemoryStore, StoreError, SubmissionStore};
use tokio::sync::RwLock;

/// In-memory store whose next operations can be made to fail
///
/// Mirrors how a remote table misbehaves: refused inserts, inserts that are
/// acknowledged without a row, failed reads, and reads that lag behind a
/// write.
#[derive(Default)]
pub struct MockStore {
    inner: MemoryStore,
    fail_next_append: Arc<RwLock<bool>>,
    drop_next_append: Arc<RwLock<bool>>,
    fail_reads: Arc<RwLock<bool>>,
    lagging_reads: Arc<RwLock<bool>>,
    append_calls: Arc<RwLock<usize>>,
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore")
            .field("inner", &self.inner)
            .field("fail_next_append", &"Arc<RwLock<bool>>")
            .field("drop_next_append", &"Arc<RwLock<bool>>")
            .field("fail_reads", &"Arc<RwLock<bool>>")
            .field("lagging_reads", &"Arc<RwLock<bool>>")
            .finish()
    }
}

impl MockStore {
    /// Healthy, empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Healthy store already holding `prices`
    #[must_use]
    pub fn with_prices(prices: impl IntoIterator<Item = Price>) -> Self {
        Self {
            inner: MemoryStore::with_prices(prices),
            ..Self::default()
        }
    }

    /// Reject the next insert with a 503
    pub async fn fail_next_append(&self) {
        *self.fail_next_append.write().await = true;
    }

    /// Acknowledge the next insert without storing or returning a row
    pub async fn drop_next_append(&self) {
        *self.drop_next_append.write().await = true;
    }

    /// Make every read fail until cleared
    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    /// Make every read return nothing until cleared
    pub async fn set_lagging_reads(&self, lagging: bool) {
        *self.lagging_reads.write().await = lagging;
    }

    /// Inserts attempted so far, successful or not
    pub async fn append_calls(&self) -> usize {
        *self.append_calls.read().await
    }

    /// Submissions actually stored
    pub async fn stored(&self) -> Vec<Submission> {
        self.inner.list_all().await.unwrap_or_default()
    }
}

#[async_trait]
impl SubmissionStore for MockStore {
    async fn append(&self, price: Price) -> Result<Submission, StoreError> {
        *self.append_calls.write().await += 1;

        if *self.fail_next_append.read().await {
            *self.fail_next_append.write().await = false;
            return Err(StoreError::Rejected {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        if *self.drop_next_append.read().await {
            *self.drop_next_append.write().await = false;
            return Err(StoreError::NotRecorded);
        }

        self.inner.append(price).await
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        if *self.fail_reads.read().await {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        if *self.lagging_reads.read().await {
            return Ok(Vec::new());
        }
        self.inner.list_all().await
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
