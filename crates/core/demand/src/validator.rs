//! Submission validation
//!
//! The form widget already constrains entry to `[min, max]` in whole steps.
//! Before persisting, the raw value is coerced to an integer price and, when
//! bounds are enforced, checked again on the server side.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ValidationError;
use crate::types::Price;

/// Accepted price range and granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Lowest accepted price
    pub min: Price,
    /// Highest accepted price (inclusive)
    pub max: Price,
    /// Granularity, counted from `min`
    pub step: i64,
}

impl PriceBounds {
    /// Create bounds, checking `min <= max` and `step > 0`
    pub fn new(min: Price, max: Price, step: i64) -> Result<Self, ValidationError> {
        if step <= 0 {
            return Err(ValidationError::InvalidStep(step));
        }
        if min > max {
            return Err(ValidationError::InvalidBounds { min, max });
        }
        Ok(Self { min, max, step })
    }

    /// Whether `price` lies in `[min, max]`
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }

    /// Whether `price` is a whole number of steps above `min`
    #[must_use]
    pub fn is_on_step(&self, price: Price) -> bool {
        let offset = i128::from(price.as_i64()) - i128::from(self.min.as_i64());
        offset.rem_euclid(i128::from(self.step)) == 0
    }

    fn check(&self, price: Price) -> Result<Price, ValidationError> {
        if price < self.min {
            return Err(ValidationError::BelowMinimum {
                price,
                min: self.min,
            });
        }
        if price > self.max {
            return Err(ValidationError::AboveMaximum {
                price,
                max: self.max,
            });
        }
        if !self.is_on_step(price) {
            return Err(ValidationError::OffStep {
                price,
                min: self.min,
                step: self.step,
            });
        }
        Ok(price)
    }
}

/// Turns raw form input into an accepted price
#[derive(Debug, Clone, Copy)]
pub struct SubmissionValidator {
    bounds: PriceBounds,
    enforce_bounds: bool,
}

impl SubmissionValidator {
    /// Validator that re-checks bounds and step
    #[must_use]
    pub const fn new(bounds: PriceBounds) -> Self {
        Self {
            bounds,
            enforce_bounds: true,
        }
    }

    /// Validator that only coerces, trusting the form widget for bounds
    #[must_use]
    pub const fn lenient(bounds: PriceBounds) -> Self {
        Self {
            bounds,
            enforce_bounds: false,
        }
    }

    /// Configured bounds
    #[must_use]
    pub const fn bounds(&self) -> &PriceBounds {
        &self.bounds
    }

    /// Whether bounds are re-checked
    #[must_use]
    pub const fn enforces_bounds(&self) -> bool {
        self.enforce_bounds
    }

    /// Coerce a raw number to an integer price, truncating toward zero
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn coerce(raw: f64) -> Result<Price, ValidationError> {
        if !raw.is_finite() {
            return Err(ValidationError::NotFinite(raw));
        }
        let truncated = raw.trunc();
        // i64::MAX is not exactly representable; 2^63 is the first value out of range
        if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            return Err(ValidationError::NotRepresentable(raw));
        }
        Ok(Price::new(truncated as i64))
    }

    /// Validate a raw submission
    pub fn validate(&self, raw: f64) -> Result<Price, ValidationError> {
        let price = Self::coerce(raw)?;
        if !self.enforce_bounds {
            return Ok(price);
        }
        self.bounds.check(price).inspect_err(|e| {
            debug!("Rejected submission {}: {}", raw, e);
        })
    }
}
