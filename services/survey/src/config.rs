//! Configuration for the survey service

use demand_core::{BinLayout, CumulativeDirection, Price, PriceBounds, SubmissionValidator};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;

/// Environment variable prefix, e.g. `SURVEY__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "SURVEY";

/// Survey service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SurveyConfig {
    /// Texts shown to respondents
    pub survey: SurveyText,
    /// Accepted price range
    pub pricing: PricingConfig,
    /// Histogram binning
    pub histogram: HistogramConfig,
    /// Cumulative demand curve
    pub cumulative: CumulativeConfig,
    /// Submission store
    pub store: StoreConfig,
    /// HTTP server
    pub server: ServerConfig,
}

/// Survey texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyText {
    /// Page title
    pub title: String,
    /// Question asked next to the price input
    pub prompt: String,
    /// Currency symbol prefixed to prices
    pub currency: String,
}

impl Default for SurveyText {
    fn default() -> Self {
        Self {
            title: "iPhone 16 Demand Survey".to_string(),
            prompt: "How much are you willing to pay for the iPhone 16?".to_string(),
            currency: "₹".to_string(),
        }
    }
}

/// Price input constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Lowest accepted price
    pub price_min: i64,
    /// Highest accepted price
    pub price_max: i64,
    /// Input granularity, prices must sit on `price_min + k * price_step`
    pub price_step: i64,
    /// Re-check bounds and step on the server
    pub enforce_bounds: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_min: 10_000,
            price_max: 300_000,
            price_step: 500,
            enforce_bounds: true,
        }
    }
}

/// How the histogram view is binned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramMode {
    /// Precomputed fixed-width bins over `[bin_start, bin_end]`
    #[default]
    Fixed,
    /// Nice-width bins over the observed range
    Auto,
}

/// Histogram settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Binning mode
    pub mode: HistogramMode,
    /// First bin edge, defaults to `pricing.price_min`
    pub bin_start: Option<i64>,
    /// Last bin edge, defaults to `pricing.price_max`
    pub bin_end: Option<i64>,
    /// Fixed bin width
    pub bin_width: i64,
    /// Upper bound on bins in auto mode
    pub max_bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            mode: HistogramMode::Fixed,
            bin_start: None,
            bin_end: None,
            bin_width: 500,
            max_bins: 40,
        }
    }
}

/// Cumulative curve settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CumulativeConfig {
    /// Sort order of distinct prices
    pub direction: CumulativeDirection,
}

/// Which store adapter backs the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, lost on restart
    #[default]
    Memory,
    /// PostgREST-compatible table (e.g. Supabase)
    Rest,
}

/// Store settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Selected adapter
    pub backend: StoreBackend,
    /// Settings for the `rest` backend
    pub rest: RestStoreConfig,
}

/// REST table settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
    /// Table holding one row per submission
    pub table: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: "iphone_demand".to_string(),
            timeout_seconds: 10,
        }
    }
}

// keep the key out of logs
impl std::fmt::Debug for RestStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStoreConfig")
            .field("url", &self.url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("table", &self.table)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            timeout_seconds: 30,
        }
    }
}

impl SurveyConfig {
    /// Load configuration from a TOML file with `SURVEY__` environment overrides
    ///
    /// Without a path only defaults and the environment apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder.add_source(Self::environment()).build()?;
        Self::finish(settings)
    }

    /// Parse configuration from TOML text, environment overrides included
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(Self::environment())
            .build()?;
        Self::finish(settings)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(settings: config::Config) -> Result<Self, ConfigError> {
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.price_bounds()?;

        match self.histogram.mode {
            HistogramMode::Fixed => {
                self.bin_layout()?;
            }
            HistogramMode::Auto if self.histogram.max_bins == 0 => {
                return Err(ConfigError::Invalid(
                    "histogram.max_bins must be greater than zero".to_string(),
                ));
            }
            HistogramMode::Auto => {}
        }

        if self.store.backend == StoreBackend::Rest {
            if self.store.rest.url.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "store.rest.url is required for the rest backend".to_string(),
                ));
            }
            if self.store.rest.table.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "store.rest.table is required for the rest backend".to_string(),
                ));
            }
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "server.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Accepted price range
    pub fn price_bounds(&self) -> Result<PriceBounds, ConfigError> {
        Ok(PriceBounds::new(
            Price::new(self.pricing.price_min),
            Price::new(self.pricing.price_max),
            self.pricing.price_step,
        )?)
    }

    /// Validator honoring `enforce_bounds`
    pub fn validator(&self) -> Result<SubmissionValidator, ConfigError> {
        let bounds = self.price_bounds()?;
        Ok(if self.pricing.enforce_bounds {
            SubmissionValidator::new(bounds)
        } else {
            SubmissionValidator::lenient(bounds)
        })
    }

    /// Fixed bin layout, edges defaulting to the price range
    pub fn bin_layout(&self) -> Result<BinLayout, ConfigError> {
        let start = self.histogram.bin_start.unwrap_or(self.pricing.price_min);
        let end = self.histogram.bin_end.unwrap_or(self.pricing.price_max);
        Ok(BinLayout::new(
            Price::new(start),
            Price::new(end),
            self.histogram.bin_width,
        )?)
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
