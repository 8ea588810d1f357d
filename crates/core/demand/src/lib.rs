//! Core types and demand aggregation for the willingness-to-pay survey
//!
//! Everything in this crate is a pure transformation over the full set of
//! submitted prices:
//! - Submission validation (integer coercion, optional bound checks)
//! - Fixed-width and auto-binned histograms
//! - Cumulative demand curve
//! - Summary statistics

#![warn(clippy::all)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregation;
pub mod errors;
pub mod types;
pub mod validator;

pub use aggregation::{
    AutoBin, Bin, BinLayout, CumulativeDirection, CumulativeRow, Histogram, HistogramRow,
    Summary, auto_histogram, cumulative_curve, histogram, summarize,
};
pub use errors::{AggregationError, ValidationError};
pub use types::{Price, Submission};
pub use validator::{PriceBounds, SubmissionValidator};
