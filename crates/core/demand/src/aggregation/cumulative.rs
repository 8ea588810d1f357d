//! Cumulative demand curve

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Price;

/// Order in which distinct prices are accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CumulativeDirection {
    /// Lowest price first: respondents willing to pay at most each price
    Ascending,
    /// Highest price first: respondents willing to pay at least each price
    #[default]
    Descending,
}

impl fmt::Display for CumulativeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

impl FromStr for CumulativeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            other => Err(format!("unknown cumulative direction: {other}")),
        }
    }
}

/// One point of the demand curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeRow {
    /// Distinct observed price
    pub price: Price,
    /// Submissions at exactly this price
    pub count_at_price: u64,
    /// Running total in curve order
    pub cumulative_count: u64,
}

/// Group prices by exact value and accumulate counts in `direction` order
///
/// One row per distinct price. Empty input gives an empty curve.
#[must_use]
pub fn cumulative_curve(prices: &[Price], direction: CumulativeDirection) -> Vec<CumulativeRow> {
    let mut counts: FxHashMap<Price, u64> = FxHashMap::default();
    for &price in prices {
        *counts.entry(price).or_insert(0) += 1;
    }

    let mut grouped: Vec<(Price, u64)> = counts.into_iter().collect();
    match direction {
        CumulativeDirection::Ascending => grouped.sort_unstable_by_key(|(price, _)| *price),
        CumulativeDirection::Descending => grouped.sort_unstable_by(|a, b| b.0.cmp(&a.0)),
    }

    let mut running = 0u64;
    grouped
        .into_iter()
        .map(|(price, count_at_price)| {
            running += count_at_price;
            CumulativeRow {
                price,
                count_at_price,
                cumulative_count: running,
            }
        })
        .collect()
}
