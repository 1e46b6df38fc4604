//! Error types for the pricing engine
//!
//! None of these reach the pricing core: fetch errors are collapsed into the
//! default catalog by [`crate::loader::CatalogLoader::load`], and config errors
//! are only raised while the host process starts up.

use thiserror::Error;

use crate::invariants::InvariantViolation;

/// Why a catalog could not be fetched from the pricing service
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("pricing service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pricing service returned status {0}")]
    Status(u16),

    #[error("pricing service reported an unsuccessful response")]
    Unsuccessful,

    #[error("failed to decode pricing payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("fetched catalog failed {} critical check(s)", .0.len())]
    InvalidCatalog(Vec<InvariantViolation>),
}

/// Configuration errors raised by [`crate::config::PricingConfig::from_env`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

pub type PricingResult<T> = Result<T, FetchError>;
