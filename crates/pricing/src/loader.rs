//! Catalog loading
//!
//! Fetches the catalog from the pricing service once per page view. Any
//! failure (transport error, non-2xx, `success: false`, bad JSON, or a
//! catalog that fails a critical invariant) is logged and replaced by the
//! built-in catalog, so callers always get something they can price with.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::error::{FetchError, PricingResult};
use crate::invariants::InvariantChecker;

/// Envelope returned by `GET /api/public/pricing`
#[derive(Debug, Deserialize)]
struct PricingResponse {
    success: bool,
    #[serde(default)]
    data: Option<Catalog>,
}

/// Where a loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Remote,
    Default,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
    pub loaded_at: OffsetDateTime,
}

/// HTTP client with the configured timeout, or a default client if that
/// cannot be built
fn http_client(timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(
                error = %e,
                timeout_secs = timeout.as_secs(),
                "Failed to build HTTP client with timeout, fetches will not time out"
            );
            Client::new()
        }
    }
}

/// Loads the catalog from the pricing service with a built-in fallback
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    http_client: Client,
    endpoint: String,
    enabled: bool,
}

impl CatalogLoader {
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            http_client: http_client(config.fetch_timeout),
            endpoint: config.pricing_endpoint(),
            enabled: config.fetch_enabled,
        }
    }

    /// Loader that never touches the network
    pub fn offline() -> Self {
        Self {
            http_client: Client::new(),
            endpoint: String::new(),
            enabled: false,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the catalog, falling back to the built-in one on any failure
    pub async fn load(&self) -> Catalog {
        self.load_with_source().await.catalog
    }

    /// Like [`Self::load`], also reporting which catalog was used
    pub async fn load_with_source(&self) -> LoadedCatalog {
        if !self.enabled {
            tracing::debug!("Catalog fetch disabled, using built-in catalog");
            return LoadedCatalog {
                catalog: Catalog::default_catalog(),
                source: CatalogSource::Default,
                loaded_at: OffsetDateTime::now_utc(),
            };
        }

        match self.fetch().await {
            Ok(catalog) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    modules = catalog.modules.len(),
                    solutions = catalog.solutions.len(),
                    "Loaded catalog from pricing service"
                );
                LoadedCatalog {
                    catalog,
                    source: CatalogSource::Remote,
                    loaded_at: OffsetDateTime::now_utc(),
                }
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Pricing service unavailable, using built-in catalog"
                );
                LoadedCatalog {
                    catalog: Catalog::default_catalog(),
                    source: CatalogSource::Default,
                    loaded_at: OffsetDateTime::now_utc(),
                }
            }
        }
    }

    /// Single fetch attempt, no fallback
    pub async fn fetch(&self) -> PricingResult<Catalog> {
        let response = self.http_client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: PricingResponse = serde_json::from_str(&body)?;

        let catalog = match payload {
            PricingResponse {
                success: true,
                data: Some(catalog),
            } => catalog,
            _ => return Err(FetchError::Unsuccessful),
        };

        let summary = InvariantChecker::check(&catalog);
        for violation in summary.violations.iter() {
            tracing::debug!(
                invariant = %violation.invariant,
                subject = %violation.subject,
                severity = %violation.severity,
                "{}",
                violation.description
            );
        }

        let critical = summary.critical();
        if !critical.is_empty() {
            return Err(FetchError::InvalidCatalog(critical));
        }

        Ok(catalog)
    }
}
