//! Summary statistics over raw prices

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Mean, median and mode of the submitted prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of submissions
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median, averaging the two middle values for even counts
    pub median: f64,
    /// Most frequent price, smallest on ties
    pub mode: Price,
    /// Lowest price
    pub min: Price,
    /// Highest price
    pub max: Price,
}

impl Summary {
    /// Mean rounded to a whole currency unit, ties to even
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_mean(&self) -> i64 {
        self.mean.round_ties_even() as i64
    }

    /// Median rounded to a whole currency unit, ties to even
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_median(&self) -> i64 {
        self.median.round_ties_even() as i64
    }
}

/// Summarize raw prices, `None` for an empty set
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(prices: &[Price]) -> Option<Summary> {
    let mut sorted: Vec<i64> = prices.iter().map(Price::as_i64).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable();

    let count = sorted.len();
    let total: i128 = sorted.iter().copied().map(i128::from).sum();
    let mean = total as f64 / count as f64;

    let mid = count / 2;
    let median = if count % 2 == 0 {
        (i128::from(sorted[mid - 1]) + i128::from(sorted[mid])) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    // Runs in ascending order; only a strictly longer run replaces the mode
    let mut mode = sorted[0];
    let mut best_run = 0usize;
    let mut start = 0usize;
    while start < count {
        let value = sorted[start];
        let run = sorted[start..].iter().take_while(|&&v| v == value).count();
        if run > best_run {
            best_run = run;
            mode = value;
        }
        start += run;
    }

    Some(Summary {
        count,
        mean,
        median,
        mode: Price::new(mode),
        min: Price::new(sorted[0]),
        max: Price::new(sorted[count - 1]),
    })
}
