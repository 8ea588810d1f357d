//! Test helper functions and utilities

use anyhow::Result;
use axum::{body::Body, response::Response};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

/// Largest response body the helpers will buffer
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Initialize test logging with environment-based configuration.
///
/// Safe to call multiple times; subsequent calls are ignored.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Buffer a response body and decode it as JSON
pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T> {
    let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// JSON request body
pub fn json_body<T: serde::Serialize>(value: &T) -> Result<Body> {
    Ok(Body::from(serde_json::to_vec(value)?))
}
