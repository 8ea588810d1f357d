//! Error types for the survey service

use demand_core::{AggregationError, ValidationError};
use thiserror::Error;

/// Failures talking to a submission store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store answered with a non-success status
    #[error("store rejected the request ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Insert acknowledged but no row came back
    #[error("store did not return the written submission")]
    NotRecorded,

    /// Response body could not be decoded
    #[error("unexpected store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

/// Why a submission was not recorded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Price failed validation, nothing was written
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Store refused or failed the insert
    #[error("could not record submission: {0}")]
    Store(#[from] StoreError),
}

/// Invalid or unloadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File or environment could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Price bounds are inconsistent
    #[error("invalid pricing: {0}")]
    Pricing(#[from] ValidationError),

    /// Bin layout cannot be built
    #[error("invalid histogram: {0}")]
    Binning(#[from] AggregationError),

    /// Any other violated invariant
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
