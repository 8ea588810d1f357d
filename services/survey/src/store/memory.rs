//! Process-local store

use async_trait::async_trait;
use demand_core::{Price, Submission};
use tokio::sync::RwLock;

use super::SubmissionStore;
use crate::errors::StoreError;

/// Submissions held in memory, lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    submissions: RwLock<Vec<Submission>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with prices, in order
    #[must_use]
    pub fn with_prices(prices: impl IntoIterator<Item = Price>) -> Self {
        Self {
            submissions: RwLock::new(prices.into_iter().map(Submission::new).collect()),
        }
    }

    /// Number of stored submissions
    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn append(&self, price: Price) -> Result<Submission, StoreError> {
        let submission = Submission::new(price);
        self.submissions.write().await.push(submission);
        Ok(submission)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.submissions.read().await.clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
