//! Error types for validation and aggregation

use crate::types::Price;
use thiserror::Error;

/// Submission rejected before persistence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Input was NaN or infinite
    #[error("Price must be a finite number, got {0}")]
    NotFinite(f64),

    /// Input does not fit an integer price
    #[error("Price {0} is outside the representable range")]
    NotRepresentable(f64),

    /// Below the configured minimum
    #[error("Price {price} is below the minimum of {min}")]
    BelowMinimum {
        /// Coerced price
        price: Price,
        /// Configured minimum
        min: Price,
    },

    /// Above the configured maximum
    #[error("Price {price} is above the maximum of {max}")]
    AboveMaximum {
        /// Coerced price
        price: Price,
        /// Configured maximum
        max: Price,
    },

    /// Not reachable from the minimum in whole steps
    #[error("Price {price} is not a multiple of {step} above {min}")]
    OffStep {
        /// Coerced price
        price: Price,
        /// Configured minimum
        min: Price,
        /// Configured step
        step: i64,
    },

    /// Bounds with `min > max`
    #[error("Invalid price bounds: min {min} exceeds max {max}")]
    InvalidBounds {
        /// Configured minimum
        min: Price,
        /// Configured maximum
        max: Price,
    },

    /// Non-positive step
    #[error("Price step must be positive, got {0}")]
    InvalidStep(i64),
}

/// Invalid binning configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// Non-positive bin width
    #[error("Bin width must be positive, got {0}")]
    InvalidBinWidth(i64),

    /// `start >= end`
    #[error("Bin range is empty: start {start} is not below end {end}")]
    EmptyRange {
        /// First edge
        start: Price,
        /// Right boundary
        end: Price,
    },

    /// Range shorter than a single bin
    #[error("No complete bin of width {width} fits between {start} and {end}")]
    NoBins {
        /// First edge
        start: Price,
        /// Right boundary
        end: Price,
        /// Bin width
        width: i64,
    },

    /// Layout would exceed [`crate::aggregation::MAX_FIXED_BINS`]
    #[error("Bin layout needs {0} bins, more than the supported maximum")]
    TooManyBins(usize),

    /// `max_bins == 0`
    #[error("Maximum bin count must be at least 1")]
    InvalidMaxBins,

    /// Auto-binned edges do not fit an integer price
    #[error("Bin boundaries overflow the price range")]
    Overflow,
}
