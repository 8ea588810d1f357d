//! Test utilities and fixtures for the survey workspace
//!
//! - rstest fixtures for configuration, stores and services
//! - Factories for on-grid and invalid prices
//! - Mock stores with injectable failures
//! - Report assertions and HTTP helpers

pub mod assertions;
pub mod factories;
pub mod fixtures;
pub mod helpers;
pub mod mocks;

pub use assertions::*;
pub use factories::*;
pub use fixtures::*;
pub use helpers::*;
pub use mocks::*;
