//! Fixed-width and auto-binned price histograms

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AggregationError;
use crate::types::Price;

/// Upper limit on the number of bins in a fixed layout
pub const MAX_FIXED_BINS: usize = 10_000;

/// Half-open price interval `[lower, upper)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower edge
    pub lower: Price,
    /// Exclusive upper edge
    pub upper: Price,
    /// Display label, `"{lower}-{upper - 1}"`
    pub label: String,
}

impl Bin {
    fn new(lower: Price, upper: Price) -> Self {
        let label = format!("{}-{}", lower.as_i64(), upper.as_i64() - 1);
        Self {
            lower,
            upper,
            label,
        }
    }

    /// Whether `price` falls in this bin
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.lower <= price && price < self.upper
    }
}

/// Precomputed, ordered sequence of contiguous equal-width bins
///
/// Edges run `start, start + width, ...` while the edge is `<= end`. When
/// `end - start` is not a multiple of `width` the trailing partial interval
/// is not a bin, so the edge list, not `end`, decides what is in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLayout {
    start: Price,
    width: i64,
    bins: Vec<Bin>,
}

impl BinLayout {
    /// Build the layout for `[start, end)` with bins of `width`
    pub fn new(start: Price, end: Price, width: i64) -> Result<Self, AggregationError> {
        if width <= 0 {
            return Err(AggregationError::InvalidBinWidth(width));
        }
        if start >= end {
            return Err(AggregationError::EmptyRange { start, end });
        }

        let span = i128::from(end.as_i64()) - i128::from(start.as_i64());
        let count = usize::try_from(span / i128::from(width)).unwrap_or(usize::MAX);
        if count == 0 {
            return Err(AggregationError::NoBins { start, end, width });
        }
        if count > MAX_FIXED_BINS {
            return Err(AggregationError::TooManyBins(count));
        }

        // count * width <= span, so no edge overflows
        let bins = (0..count as i64)
            .map(|i| {
                let lower = start.as_i64() + i * width;
                Bin::new(Price::new(lower), Price::new(lower + width))
            })
            .collect();

        Ok(Self { start, width, bins })
    }

    /// Bins in order
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Bin edges, one more than the number of bins
    pub fn edges(&self) -> impl Iterator<Item = Price> + '_ {
        self.bins
            .iter()
            .map(|bin| bin.lower)
            .chain(self.bins.last().map(|bin| bin.upper))
    }

    /// Bin labels in order
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.bins.iter().map(|bin| bin.label.as_str())
    }

    /// Bin width
    #[must_use]
    pub const fn width(&self) -> i64 {
        self.width
    }

    /// Number of bins
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false for a constructed layout
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Index of the bin holding `price`, if any
    #[must_use]
    pub fn locate(&self, price: Price) -> Option<usize> {
        let offset = i128::from(price.as_i64()) - i128::from(self.start.as_i64());
        if offset < 0 {
            return None;
        }
        let index = usize::try_from(offset / i128::from(self.width)).ok()?;
        (index < self.bins.len()).then_some(index)
    }
}

/// One histogram bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramRow {
    /// Bin label
    pub bin_label: String,
    /// Inclusive lower edge
    pub lower: Price,
    /// Exclusive upper edge
    pub upper: Price,
    /// Prices in the bin
    pub count: u64,
}

/// Fixed-width histogram over a [`BinLayout`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    /// One row per bin, zero-count bins included
    pub rows: Vec<HistogramRow>,
    /// Prices that fell outside every bin
    pub out_of_range: u64,
}

impl Histogram {
    /// Sum of all row counts
    #[must_use]
    pub fn binned(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }
}

/// Count prices per bin
///
/// Bins are left-closed, right-open; prices outside the layout are counted
/// in [`Histogram::out_of_range`] and otherwise ignored.
#[must_use]
pub fn histogram(prices: &[Price], layout: &BinLayout) -> Histogram {
    let mut counts = vec![0u64; layout.len()];
    let mut out_of_range = 0u64;

    for &price in prices {
        match layout.locate(price) {
            Some(index) => counts[index] += 1,
            None => out_of_range += 1,
        }
    }

    if out_of_range > 0 {
        debug!(
            "{} of {} prices outside bin layout",
            out_of_range,
            prices.len()
        );
    }

    let rows = layout
        .bins()
        .iter()
        .zip(counts)
        .map(|(bin, count)| HistogramRow {
            bin_label: bin.label.clone(),
            lower: bin.lower,
            upper: bin.upper,
            count,
        })
        .collect();

    Histogram { rows, out_of_range }
}

/// Bin chosen from the observed price range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBin {
    /// Inclusive lower edge
    pub lower: Price,
    /// Exclusive upper edge
    pub upper: Price,
    /// Prices in the bin
    pub count: u64,
}

/// Equal-width histogram over `[min(prices), max(prices)]`
///
/// Uses at most `max_bins` bins with a "nice" width (1, 2 or 5 times a power
/// of ten); the first edge is aligned down to a multiple of the width. Every
/// price lands in exactly one bin. Empty input gives an empty result.
pub fn auto_histogram(prices: &[Price], max_bins: usize) -> Result<Vec<AutoBin>, AggregationError> {
    if max_bins == 0 {
        return Err(AggregationError::InvalidMaxBins);
    }
    let (Some(min), Some(max)) = (prices.iter().min(), prices.iter().max()) else {
        return Ok(Vec::new());
    };

    let min = i128::from(min.as_i64());
    let max = i128::from(max.as_i64());
    let limit = i128::try_from(max_bins).unwrap_or(i128::MAX);

    // Smallest width that could cover max - min + 1 integer prices
    let needed = (max - min + 1 + limit - 1) / limit;
    let mut width = nice_width(needed);
    let (lower, count) = loop {
        let lower = min.div_euclid(width) * width;
        let count = (max - lower) / width + 1;
        if count <= limit {
            break (lower, count);
        }
        width = next_nice_width(width);
    };

    let to_price = |value: i128| {
        i64::try_from(value)
            .map(Price::new)
            .map_err(|_| AggregationError::Overflow)
    };

    let mut bins = (0..count)
        .map(|i| {
            Ok(AutoBin {
                lower: to_price(lower + i * width)?,
                upper: to_price(lower + (i + 1) * width)?,
                count: 0,
            })
        })
        .collect::<Result<Vec<_>, AggregationError>>()?;

    for price in prices {
        let offset = i128::from(price.as_i64()) - lower;
        // offset is in [0, count * width) by construction
        if let Ok(index) = usize::try_from(offset / width) {
            if let Some(bin) = bins.get_mut(index) {
                bin.count += 1;
            }
        }
    }

    Ok(bins)
}

/// Smallest value of the form {1, 2, 5} * 10^k that is `>= at_least`
fn nice_width(at_least: i128) -> i128 {
    let mut width = 1;
    while width < at_least {
        width = next_nice_width(width);
    }
    width
}

fn next_nice_width(width: i128) -> i128 {
    let mut magnitude = 1;
    while magnitude * 10 <= width {
        magnitude *= 10;
    }
    match width / magnitude {
        1 => 2 * magnitude,
        2 => 5 * magnitude,
        _ => 10 * magnitude,
    }
}
