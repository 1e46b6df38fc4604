// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pricing Engine
//!
//! Prices the modular subscription offered on the marketing site.
//!
//! ## Features
//!
//! - **Catalog**: Base plan, modules, solution bundles and seat packs, fetched
//!   from the pricing service with a built-in fallback
//! - **Selection**: The customer's modules, seat packs and billing cycle
//! - **Free Module**: The earliest selected module is always free
//! - **Summary**: Totals, line items, seats and the all-in upsell
//! - **ROI**: Illustrative yearly savings estimate
//! - **Invariants**: Consistency checks run against fetched catalogs
//!
//! All amounts are integer cents except the ROI estimate.

pub mod allocator;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod configurator;
pub mod defaults;
pub mod error;
pub mod invariants;
pub mod loader;
pub mod roi;
pub mod selection;


// Calculator
pub use calculator::{
    compare_cycles, compute_summary, AllInOffer, CycleComparison, ModuleLineItem, PricingSummary,
};

// Catalog
pub use catalog::{
    AllInBundle, BasePlan, BillingCycle, Catalog, ModulePlan, SolutionPlan, UsageLimit,
    UserPackPlan,
};
pub use defaults::MAX_USER_PACKS;

// Config
pub use config::PricingConfig;

// Configurator
pub use configurator::Configurator;

// Error
pub use error::{ConfigError, FetchError, PricingResult};

// Invariants
pub use invariants::{
    InvariantCheckSummary, InvariantChecker, InvariantViolation, ViolationSeverity,
    MAX_LIMIT_INCLUDED, MAX_PRICE_CENTS, MAX_SEATS,
};

// Loader
pub use loader::{CatalogLoader, CatalogSource, LoadedCatalog};

// ROI
pub use roi::{compute_roi, compute_roi_with, FieldBounds, RoiAssumptions, RoiInputs, RoiResult};

// Selection
pub use selection::{PackOutcome, Selection, ToggleOutcome};
