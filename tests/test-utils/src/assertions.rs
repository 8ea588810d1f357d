//! Custom assertions for demand reports

use std::fmt::Debug;
use survey_service::DemandReport;

/// Assert that a collection is sorted
pub fn assert_sorted<T: PartialOrd + Debug>(collection: &[T]) {
    for window in collection.windows(2) {
        assert!(
            window[0] <= window[1],
            "Collection not sorted at elements: {:?} > {:?}",
            window[0],
            window[1]
        );
    }
}

/// Assert the accounting identities every report must satisfy
///
/// Binned plus out-of-range counts cover every response, the cumulative
/// curve ends at the response count, and the summary exists exactly when
/// there is data.
pub fn assert_report_consistent(report: &DemandReport) {
    let total = report.total_responses as u64;

    if let Some(histogram) = &report.histogram {
        assert_eq!(
            histogram.binned() + histogram.out_of_range,
            total,
            "histogram does not account for every response"
        );
    }
    if let Some(bins) = &report.auto_histogram {
        assert_eq!(
            bins.iter().map(|b| b.count).sum::<u64>(),
            total,
            "auto histogram does not account for every response"
        );
    }

    let running: Vec<u64> = report.cumulative.iter().map(|r| r.cumulative_count).collect();
    assert_sorted(&running);
    assert_eq!(running.last().copied().unwrap_or(0), total);
    assert_eq!(
        report.cumulative.iter().map(|r| r.count_at_price).sum::<u64>(),
        total
    );

    match &report.summary {
        Some(summary) => assert_eq!(summary.count, report.total_responses),
        None => assert_eq!(total, 0, "summary missing for a non-empty report"),
    }
}
