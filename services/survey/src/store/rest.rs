//! Store backed by a PostgREST-compatible table (Supabase and friends)

use async_trait::async_trait;
use demand_core::{Price, Submission};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::SubmissionStore;
use crate::config::RestStoreConfig;
use crate::errors::StoreError;

/// Longest error body carried into a [`StoreError::Rejected`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct NewSubmission {
    price: Price,
}

/// Remote table, one row per submission
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestStore {
    /// Client for `{url}/rest/v1/{table}`
    pub fn new(config: &RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            api_key: config.api_key.clone(),
        })
    }

    /// Table endpoint requests go to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        warn!("Store answered {}: {}", status, body);
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SubmissionStore for RestStore {
    async fn append(&self, price: Price) -> Result<Submission, StoreError> {
        let response = self
            .authorized(self.client.post(&self.endpoint))
            .header("Prefer", "return=representation")
            .json(&NewSubmission { price })
            .send()
            .await?;

        let rows: Vec<Submission> = Self::check_status(response).await?.json().await?;
        debug!("Insert of {} returned {} rows", price, rows.len());
        rows.into_iter().next().ok_or(StoreError::NotRecorded)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        let response = self
            .authorized(self.client.get(&self.endpoint))
            .query(&[("select", "*")])
            .send()
            .await?;

        let rows: Vec<Submission> = Self::check_status(response).await?.json().await?;
        debug!("Fetched {} submissions from {}", rows.len(), self.endpoint);
        Ok(rows)
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
