//! Plain-text rendering of a demand report for the terminal

use demand_core::{CumulativeDirection, types::group_thousands};
use std::fmt::Write;

use crate::service::{DemandReport, ReportStatus};

/// Widest histogram bar in characters
const BAR_WIDTH: u64 = 40;

/// Render every view of `report`
///
/// Empty fixed bins are collapsed into a single note so wide layouts stay
/// readable.
#[must_use]
pub fn render_report(report: &DemandReport) -> String {
    let mut out = String::new();
    let currency = report.form.currency.as_str();

    match &report.status {
        ReportStatus::Ready => {}
        ReportStatus::AwaitingFirstSubmission => {
            out.push_str("No responses yet. Be the first to submit!\n");
            return out;
        }
        ReportStatus::Refreshing => {
            out.push_str("Fetching updated data... run `survey report` again shortly.\n");
            return out;
        }
        ReportStatus::StoreUnavailable { message } => {
            let _ = writeln!(out, "⚠️  Could not load responses: {message}");
            return out;
        }
    }

    let _ = writeln!(out, "📊 Demand Histogram ({} responses)", report.total_responses);
    if let Some(histogram) = &report.histogram {
        let peak = histogram.rows.iter().map(|r| r.count).max().unwrap_or(0);
        let mut empty = 0usize;
        for row in &histogram.rows {
            if row.count == 0 {
                empty += 1;
                continue;
            }
            let _ = writeln!(
                out,
                "  {:>17}  {:>5}  {}",
                row.bin_label,
                row.count,
                bar(row.count, peak)
            );
        }
        if empty > 0 {
            let _ = writeln!(out, "  ({empty} empty bins not shown)");
        }
        if histogram.out_of_range > 0 {
            let _ = writeln!(
                out,
                "  ({} responses outside the binned range)",
                histogram.out_of_range
            );
        }
    }
    if let Some(bins) = &report.auto_histogram {
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
        for bin in bins {
            let _ = writeln!(
                out,
                "  {:>17}  {:>5}  {}",
                format!("{}-{}", bin.lower.as_i64(), bin.upper.as_i64() - 1),
                bin.count,
                bar(bin.count, peak)
            );
        }
    }

    let heading = match report.cumulative_direction {
        CumulativeDirection::Descending => "willing to pay at least",
        CumulativeDirection::Ascending => "willing to pay at most",
    };
    let _ = writeln!(out, "\n📉 Cumulative Demand (respondents {heading})");
    for row in &report.cumulative {
        let _ = writeln!(
            out,
            "  {currency}{:>12}  {:>5}  {:>6}",
            row.price.to_string(),
            row.count_at_price,
            row.cumulative_count
        );
    }

    if let Some(summary) = &report.summary {
        let _ = writeln!(out, "\n📈 Summary Stats");
        let _ = writeln!(
            out,
            "  Average WTP: {currency}{}",
            group_thousands(summary.rounded_mean())
        );
        let _ = writeln!(
            out,
            "  Median WTP: {currency}{}",
            group_thousands(summary.rounded_median())
        );
        let _ = writeln!(out, "  Most Common WTP: {currency}{}", summary.mode);
        let _ = writeln!(
            out,
            "  Range: {currency}{} to {currency}{}",
            summary.min, summary.max
        );
    }

    out
}

#[allow(clippy::cast_possible_truncation)]
fn bar(count: u64, peak: u64) -> String {
    if peak == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(peak);
    "█".repeat(len as usize)
}
