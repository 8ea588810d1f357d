//! One render pass: validate, persist, read everything back, aggregate

use demand_core::{
    AutoBin, BinLayout, CumulativeDirection, CumulativeRow, Histogram, Price, Submission,
    SubmissionValidator, Summary, auto_histogram, cumulative_curve, histogram, summarize,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{HistogramMode, SurveyConfig};
use crate::errors::{ConfigError, SubmitError};
use crate::store::SubmissionStore;

/// What the UI needs to draw the price input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyForm {
    /// Page title
    pub title: String,
    /// Question text
    pub prompt: String,
    /// Currency symbol
    pub currency: String,
    /// Lowest accepted price
    pub min_price: Price,
    /// Highest accepted price
    pub max_price: Price,
    /// Input granularity
    pub step: i64,
}

/// State of the aggregate views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportStatus {
    /// At least one submission was aggregated
    Ready,
    /// The store was read and holds nothing yet
    AwaitingFirstSubmission,
    /// Nothing was read back right after a successful submit
    Refreshing,
    /// The store could not be read; views cover the empty set
    StoreUnavailable {
        /// User-facing reason
        message: String,
    },
}

/// Every aggregate view over the current submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandReport {
    /// State of the data behind the views
    pub status: ReportStatus,
    /// Submissions aggregated
    pub total_responses: usize,
    /// Fixed-width histogram, in fixed mode
    pub histogram: Option<Histogram>,
    /// Observed-range histogram, in auto mode
    pub auto_histogram: Option<Vec<AutoBin>>,
    /// Order of the cumulative curve
    pub cumulative_direction: CumulativeDirection,
    /// Respondents per distinct price, running totals
    pub cumulative: Vec<CumulativeRow>,
    /// `None` until the first submission
    pub summary: Option<Summary>,
    /// Form descriptor, for currency and bounds
    pub form: SurveyForm,
}

#[derive(Debug, Clone)]
enum Binning {
    Fixed(BinLayout),
    Auto { max_bins: usize },
}

/// Survey orchestration over an injected store
///
/// Holds configuration only; every report reads the store afresh.
pub struct SurveyService {
    store: Arc<dyn SubmissionStore>,
    validator: SubmissionValidator,
    binning: Binning,
    direction: CumulativeDirection,
    form: SurveyForm,
}

impl SurveyService {
    /// Build the service from validated configuration
    pub fn new(config: &SurveyConfig, store: Arc<dyn SubmissionStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        let binning = match config.histogram.mode {
            HistogramMode::Fixed => Binning::Fixed(config.bin_layout()?),
            HistogramMode::Auto => Binning::Auto {
                max_bins: config.histogram.max_bins,
            },
        };

        let bounds = config.price_bounds()?;
        Ok(Self {
            store,
            validator: config.validator()?,
            binning,
            direction: config.cumulative.direction,
            form: SurveyForm {
                title: config.survey.title.clone(),
                prompt: config.survey.prompt.clone(),
                currency: config.survey.currency.clone(),
                min_price: bounds.min,
                max_price: bounds.max,
                step: bounds.step,
            },
        })
    }

    /// Form descriptor for the UI
    #[must_use]
    pub fn form(&self) -> &SurveyForm {
        &self.form
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.store
    }

    /// Validate a raw price and persist it
    ///
    /// Nothing is written when validation fails. Store failures are
    /// returned, never retried.
    pub async fn submit(&self, raw: f64) -> Result<Submission, SubmitError> {
        let price = self.validator.validate(raw)?;
        let submission = self
            .store
            .append(price)
            .await
            .inspect_err(|e| warn!("Failed to record submission of {}: {}", price, e))?;

        info!("Recorded submission of {}", submission.price);
        Ok(submission)
    }

    /// Read every submission and recompute all views
    ///
    /// `just_submitted` marks a pass that follows a successful submit, where
    /// an empty read means the store has not caught up yet.
    pub async fn report(&self, just_submitted: bool) -> DemandReport {
        match self.store.list_all().await {
            Ok(submissions) => {
                let prices: Vec<Price> = submissions.iter().map(|s| s.price).collect();
                let status = match (prices.is_empty(), just_submitted) {
                    (false, _) => ReportStatus::Ready,
                    (true, false) => ReportStatus::AwaitingFirstSubmission,
                    (true, true) => ReportStatus::Refreshing,
                };
                self.aggregate(&prices, status)
            }
            Err(e) => {
                warn!("Could not load submissions from {}: {}", self.store.backend_name(), e);
                self.aggregate(
                    &[],
                    ReportStatus::StoreUnavailable {
                        message: e.to_string(),
                    },
                )
            }
        }
    }

    /// Compute every view over `prices`
    #[must_use]
    pub fn aggregate(&self, prices: &[Price], status: ReportStatus) -> DemandReport {
        let (fixed, auto) = match &self.binning {
            Binning::Fixed(layout) => (Some(histogram(prices, layout)), None),
            Binning::Auto { max_bins } => {
                let bins = auto_histogram(prices, *max_bins).unwrap_or_else(|e| {
                    error!("Auto binning failed: {}", e);
                    Vec::new()
                });
                (None, Some(bins))
            }
        };

        DemandReport {
            status,
            total_responses: prices.len(),
            histogram: fixed,
            auto_histogram: auto,
            cumulative_direction: self.direction,
            cumulative: cumulative_curve(prices, self.direction),
            summary: summarize(prices),
            form: self.form.clone(),
        }
    }
}

impl std::fmt::Debug for SurveyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyService")
            .field("store", &self.store.backend_name())
            .field("validator", &self.validator)
            .field("binning", &self.binning)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}
