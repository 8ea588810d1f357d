//! Core types for survey submissions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a new price from whole currency units
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Get price as i64 units
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Get the price as f64
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Zero price
    pub const ZERO: Self = Self(0);
}

impl From<i64> for Price {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

/// Render an integer with comma thousands separators (`51000` -> `51,000`)
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One stored survey response
///
/// Stores may carry extra columns (row id, creation time); only the price is
/// part of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submitted willingness to pay
    pub price: Price,
}

impl Submission {
    /// Create a submission for a price
    #[must_use]
    pub const fn new(price: Price) -> Self {
        Self { price }
    }
}
