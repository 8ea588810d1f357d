//! Loading configuration from TOML files and the environment

use demand_core::CumulativeDirection;
use pretty_assertions::assert_eq;
use std::io::Write;
use survey_service::{ConfigError, HistogramMode, StoreBackend, SurveyConfig};
use tempfile::Builder;

const SAMPLE: &str = r#"
[survey]
title = "Headphones Survey"
currency = "$"

[pricing]
price_min = 50
price_max = 500
price_step = 10

[histogram]
mode = "auto"
max_bins = 12

[cumulative]
direction = "ascending"

[store]
backend = "memory"
"#;

#[test]
fn test_partial_file_keeps_defaults() -> Result<(), ConfigError> {
    let config = SurveyConfig::from_toml_str(SAMPLE)?;

    assert_eq!(config.survey.title, "Headphones Survey");
    assert_eq!(config.survey.currency, "$");
    // not in the file
    assert_eq!(
        config.survey.prompt,
        "How much are you willing to pay for the iPhone 16?"
    );
    assert!(config.pricing.enforce_bounds);
    assert_eq!(config.pricing.price_step, 10);
    assert_eq!(config.histogram.mode, HistogramMode::Auto);
    assert_eq!(config.histogram.max_bins, 12);
    assert_eq!(config.cumulative.direction, CumulativeDirection::Ascending);
    assert_eq!(config.store.backend, StoreBackend::Memory);
    Ok(())
}

#[test]
fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = Builder::new().suffix(".toml").tempfile()?;
    file.write_all(SAMPLE.as_bytes())?;

    let config = SurveyConfig::load(Some(file.path()))?;
    assert_eq!(config.pricing.price_max, 500);
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let result = SurveyConfig::load(Some(std::path::Path::new("/nonexistent/survey.toml")));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let result = SurveyConfig::from_toml_str(
        r#"
[histogram]
bin_start = 30000
bin_end = 10000
"#,
    );
    assert!(matches!(result, Err(ConfigError::Binning(_))), "{result:?}");

    let result = SurveyConfig::from_toml_str(
        r#"
[store]
backend = "rest"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))), "{result:?}");

    let result = SurveyConfig::from_toml_str(
        r#"
[cumulative]
direction = "sideways"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Load(_))), "{result:?}");
}

#[test]
fn test_shipped_config_keeps_responses_in_memory() -> Result<(), ConfigError> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("survey.toml");
    let config = SurveyConfig::load(Some(&path))?;
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.pricing.price_step, 500);
    Ok(())
}

#[test]
fn test_unknown_store_backend_is_rejected() {
    // only memory and rest are accepted
    let result = SurveyConfig::from_toml_str(
        r#"
[store]
backend = "wal"
wal_dir = "./data/submissions"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Load(_))), "{result:?}");
}

#[test]
fn test_environment_overrides_file() -> Result<(), ConfigError> {
    // SAFETY: no other test in this binary asserts on the server port
    unsafe {
        std::env::set_var("SURVEY__SERVER__PORT", "9090");
    }
    let config = SurveyConfig::from_toml_str(SAMPLE);
    unsafe {
        std::env::remove_var("SURVEY__SERVER__PORT");
    }

    let config = config?;
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.survey.title, "Headphones Survey");
    Ok(())
}
