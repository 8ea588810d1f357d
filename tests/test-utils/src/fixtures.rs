//! Test fixtures for common survey setups

use demand_core::Price;
use rstest::fixture;
use std::sync::Arc;
use ::survey_service::{StoreBackend, SurveyConfig, SurveyService};

use crate::{helpers::init_test_logging, mocks::MockStore};

/// Default configuration on the in-memory backend
#[fixture]
pub fn survey_config() -> SurveyConfig {
    let mut config = SurveyConfig::default();
    config.store.backend = StoreBackend::Memory;
    config
}

/// Narrow classroom setup: 10,000 to 30,000 in bins of 500
#[fixture]
pub fn classroom_config() -> SurveyConfig {
    let mut config = survey_config();
    config.pricing.price_min = 10_000;
    config.pricing.price_max = 30_000;
    config.histogram.bin_start = Some(10_000);
    config.histogram.bin_end = Some(30_000);
    config
}

/// Four responses with a repeated price
#[fixture]
pub fn sample_prices() -> Vec<Price> {
    [51_000, 51_000, 52_000, 75_000]
        .into_iter()
        .map(Price::new)
        .collect()
}

/// Empty mock store
#[fixture]
pub fn mock_store() -> Arc<MockStore> {
    Arc::new(MockStore::new())
}

/// Service over an empty mock store, with a handle to the store
#[fixture]
pub fn survey_service(
    survey_config: SurveyConfig,
    mock_store: Arc<MockStore>,
) -> (SurveyService, Arc<MockStore>) {
    init_test_logging();
    let service = SurveyService::new(&survey_config, mock_store.clone())
        .unwrap_or_else(|e| panic!("fixture configuration is valid: {e}"));
    (service, mock_store)
}
