//! Pricing engine configuration
//!
//! Read from the environment (after `dotenvy` has loaded `.env`):
//!
//! - `PRICING_SERVICE_URL`: base URL of the pricing service (default: `http://localhost:3000`)
//! - `PRICING_FETCH_ENABLED`: set to `false` to always use the built-in catalog (default: `true`)
//! - `PRICING_FETCH_TIMEOUT_SECS`: request timeout for the catalog fetch (default: 10)
//! - `ROI_ASSUMED_ANNUAL_COST`: yearly cost the ROI estimate compares against (default: 1188)

use std::time::Duration;

use crate::error::ConfigError;
use crate::roi::DEFAULT_ANNUAL_COST;

const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub service_url: String,
    pub fetch_enabled: bool,
    pub fetch_timeout: Duration,
    pub roi_annual_cost: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            fetch_enabled: true,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            roi_annual_cost: DEFAULT_ANNUAL_COST,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        _ => Ok(default),
    }
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
        Err(_) => Ok(default),
    }
}

impl PricingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_url = std::env::var("PRICING_SERVICE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let fetch_enabled = parse_bool("PRICING_FETCH_ENABLED", true)?;
        let timeout_secs = parse_var("PRICING_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        let roi_annual_cost = parse_var("ROI_ASSUMED_ANNUAL_COST", DEFAULT_ANNUAL_COST)?;

        if roi_annual_cost < 0.0 || !roi_annual_cost.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "ROI_ASSUMED_ANNUAL_COST",
                value: roi_annual_cost.to_string(),
            });
        }

        Ok(Self {
            service_url,
            fetch_enabled,
            fetch_timeout: Duration::from_secs(timeout_secs),
            roi_annual_cost,
        })
    }

    /// Full URL of the public pricing endpoint
    pub fn pricing_endpoint(&self) -> String {
        format!("{}/api/public/pricing", self.service_url)
    }
}
