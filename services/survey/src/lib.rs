//! Willingness-to-pay survey service
//!
//! Collects one price per respondent, persists it through a
//! [`SubmissionStore`], and recomputes the demand views from every stored
//! submission on each render.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod models;
pub mod render;
pub mod server;
pub mod service;
pub mod store;

pub use config::{HistogramMode, StoreBackend, SurveyConfig};
pub use errors::{ConfigError, StoreError, SubmitError};
pub use server::{create_router, serve};
pub use service::{DemandReport, ReportStatus, SurveyForm, SurveyService};
pub use store::{MemoryStore, RestStore, SubmissionStore, build_store};
