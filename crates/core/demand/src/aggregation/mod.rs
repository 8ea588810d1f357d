//! Aggregate views over the full submission set
//!
//! Every function recomputes from scratch. There is no hidden state, so the
//! same prices always produce the same views and callers may re-render as
//! often as they like.

pub mod cumulative;
pub mod histogram;
pub mod summary;

pub use cumulative::{CumulativeDirection, CumulativeRow, cumulative_curve};
pub use histogram::{
    AutoBin, Bin, BinLayout, Histogram, HistogramRow, MAX_FIXED_BINS, auto_histogram, histogram,
};
pub use summary::{Summary, summarize};
