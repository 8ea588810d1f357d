//! Submission store adapters
//!
//! The survey only ever appends a price and reads every submission back.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use demand_core::{Price, Submission};
use std::sync::Arc;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::errors::StoreError;

/// Shared table of survey responses
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist one price and return the stored submission
    async fn append(&self, price: Price) -> Result<Submission, StoreError>;

    /// Every stored submission in insertion order
    async fn list_all(&self) -> Result<Vec<Submission>, StoreError>;

    /// Short adapter name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Whether the store currently answers reads
    async fn is_healthy(&self) -> bool {
        self.list_all().await.is_ok()
    }
}

/// Build the adapter selected by configuration
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn SubmissionStore>, StoreError> {
    let store: Arc<dyn SubmissionStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Rest => Arc::new(RestStore::new(&config.rest)?),
    };
    info!("Using {} submission store", store.backend_name());
    Ok(store)
}
