//! Catalog Invariants Module
//!
//! Consistency checks for a catalog. The loader runs them against every
//! catalog fetched from the pricing service and refuses one with a critical
//! violation, falling back to the built-in catalog instead.
//!
//! ## Design Principles
//!
//! 1. **Explanatory**: Violations name the offending entity
//! 2. **Non-destructive**: Checks only read the catalog
//! 3. **Graded**: Only critical violations make a catalog unusable

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::catalog::{BillingCycle, Catalog};

/// Tolerance, in percentage points, between declared and computed savings
const SAVINGS_TOLERANCE: i64 = 1;

/// Highest price accepted for any single catalog entry (10M in cents)
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Highest seat count accepted for the base plan or a seat pack
pub const MAX_SEATS: u32 = 1_000_000;

/// Highest quota accepted for a single module limit
pub const MAX_LIMIT_INCLUDED: u64 = 1_000_000_000_000;

/// Result of a single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantViolation {
    /// Which invariant was violated
    pub invariant: String,
    /// Module key, solution id or plan name the violation is about
    pub subject: String,
    /// Human-readable description of the violation
    pub description: String,
    pub severity: ViolationSeverity,
}

/// Severity of an invariant violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationSeverity {
    /// Critical - prices cannot be computed correctly from this catalog
    Critical,
    /// High - figures would be shown but are misleading
    High,
    /// Medium - potential issue, should investigate
    Medium,
    /// Low - cosmetic inconsistency, informational
    Low,
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationSeverity::Critical => write!(f, "CRITICAL"),
            ViolationSeverity::High => write!(f, "HIGH"),
            ViolationSeverity::Medium => write!(f, "MEDIUM"),
            ViolationSeverity::Low => write!(f, "LOW"),
        }
    }
}

/// Summary of all invariant checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvariantCheckSummary {
    /// When the check was run
    pub checked_at: OffsetDateTime,
    pub checks_run: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub violations: Vec<InvariantViolation>,
    pub healthy: bool,
}

impl InvariantCheckSummary {
    /// Violations that make the catalog unusable
    pub fn critical(&self) -> Vec<InvariantViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Critical)
            .cloned()
            .collect()
    }
}

fn violation(
    invariant: &str,
    subject: &str,
    description: String,
    severity: ViolationSeverity,
) -> InvariantViolation {
    InvariantViolation {
        invariant: invariant.to_string(),
        subject: subject.to_string(),
        description,
        severity,
    }
}

/// `(subject, monthly, annual)` for every priced entry in the catalog
fn priced_entries(catalog: &Catalog) -> Vec<(String, i64, i64)> {
    let mut priced: Vec<(String, i64, i64)> = vec![
        (
            "base_plan".to_string(),
            catalog.base_plan.price,
            catalog.base_plan.annual_price,
        ),
        (
            "user_pack".to_string(),
            catalog.user_pack.price,
            catalog.user_pack.annual_price,
        ),
    ];
    priced.extend(
        catalog
            .modules
            .iter()
            .map(|m| (m.key.clone(), m.price, m.annual_price)),
    );
    priced.extend(
        catalog
            .solutions
            .iter()
            .map(|s| (s.id.clone(), s.price, s.annual_price)),
    );
    if let Some(all_in) = &catalog.all_in {
        priced.push(("all_in".to_string(), all_in.price, all_in.annual_price));
    }
    priced
}

/// Runs catalog invariant checks
pub struct InvariantChecker;

impl InvariantChecker {
    /// Run all checks and return a summary
    pub fn check(catalog: &Catalog) -> InvariantCheckSummary {
        let mut violations = Vec::new();

        violations.extend(Self::check_unique_module_keys(catalog));
        violations.extend(Self::check_non_negative_prices(catalog));
        violations.extend(Self::check_values_within_bounds(catalog));
        violations.extend(Self::check_solution_modules_valid(catalog));
        violations.extend(Self::check_annual_not_above_twelve_months(catalog));
        violations.extend(Self::check_non_negative_savings(catalog));
        violations.extend(Self::check_solution_savings_consistent(catalog));

        let checks_run = Self::available_checks().len();
        let checks_failed = violations
            .iter()
            .map(|v| &v.invariant)
            .collect::<HashSet<_>>()
            .len();

        InvariantCheckSummary {
            checked_at: OffsetDateTime::now_utc(),
            checks_run,
            checks_passed: checks_run - checks_failed,
            checks_failed,
            healthy: violations.is_empty(),
            violations,
        }
    }

    /// Invariant 1: module keys are unique
    ///
    /// Selections refer to modules by key, so a duplicate makes the price of
    /// a selected module ambiguous.
    fn check_unique_module_keys(catalog: &Catalog) -> Vec<InvariantViolation> {
        let mut seen = HashSet::new();
        catalog
            .modules
            .iter()
            .filter(|m| !seen.insert(m.key.as_str()))
            .map(|m| {
                violation(
                    "unique_module_keys",
                    &m.key,
                    format!("Module key '{}' appears more than once", m.key),
                    ViolationSeverity::Critical,
                )
            })
            .collect()
    }

    /// Invariant 2: no negative prices anywhere
    fn check_non_negative_prices(catalog: &Catalog) -> Vec<InvariantViolation> {
        priced_entries(catalog)
            .into_iter()
            .filter(|(_, price, annual)| *price < 0 || *annual < 0)
            .map(|(subject, price, annual)| {
                violation(
                    "non_negative_prices",
                    &subject,
                    format!(
                        "'{}' has a negative price (monthly {}, annual {})",
                        subject, price, annual
                    ),
                    ViolationSeverity::Critical,
                )
            })
            .collect()
    }

    /// Invariant 3: prices, seats and quotas stay within sane bounds
    ///
    /// Keeps every total the calculator can produce far from `i64::MAX`.
    fn check_values_within_bounds(catalog: &Catalog) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for (subject, price, annual) in priced_entries(catalog) {
            if price > MAX_PRICE_CENTS || annual > MAX_PRICE_CENTS {
                violations.push(violation(
                    "values_within_bounds",
                    &subject,
                    format!(
                        "'{}' price exceeds {} cents (monthly {}, annual {})",
                        subject, MAX_PRICE_CENTS, price, annual
                    ),
                    ViolationSeverity::Critical,
                ));
            }
        }

        for (subject, seats) in [
            ("base_plan", catalog.base_plan.users_included),
            ("user_pack", catalog.user_pack.size),
        ] {
            if seats > MAX_SEATS {
                violations.push(violation(
                    "values_within_bounds",
                    subject,
                    format!("'{}' has {} seats, more than {}", subject, seats, MAX_SEATS),
                    ViolationSeverity::Critical,
                ));
            }
        }

        for module in &catalog.modules {
            for limit in module
                .limits
                .iter()
                .filter(|l| l.included > MAX_LIMIT_INCLUDED)
            {
                violations.push(violation(
                    "values_within_bounds",
                    &module.key,
                    format!(
                        "Module '{}' includes {} {}, more than {}",
                        module.key, limit.included, limit.resource, MAX_LIMIT_INCLUDED
                    ),
                    ViolationSeverity::Critical,
                ));
            }
        }

        violations
    }

    /// Invariant 4: every solution bundles at least one known module
    fn check_solution_modules_valid(catalog: &Catalog) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        for solution in &catalog.solutions {
            if solution.modules.is_empty() {
                violations.push(violation(
                    "solution_modules_valid",
                    &solution.id,
                    format!("Solution '{}' bundles no modules", solution.id),
                    ViolationSeverity::Critical,
                ));
            }
            for key in solution
                .modules
                .iter()
                .filter(|k| !catalog.contains_module(k))
            {
                violations.push(violation(
                    "solution_modules_valid",
                    &solution.id,
                    format!(
                        "Solution '{}' references unknown module '{}'",
                        solution.id, key
                    ),
                    ViolationSeverity::Critical,
                ));
            }
        }
        violations
    }

    /// Invariant 5: paying yearly never costs more than twelve monthly payments
    fn check_annual_not_above_twelve_months(catalog: &Catalog) -> Vec<InvariantViolation> {
        let mut priced: Vec<(String, i64, i64)> = vec![
            (
                "base_plan".to_string(),
                catalog.base_plan.price,
                catalog.base_plan.annual_price,
            ),
            (
                "user_pack".to_string(),
                catalog.user_pack.price,
                catalog.user_pack.annual_price,
            ),
        ];
        priced.extend(
            catalog
                .modules
                .iter()
                .map(|m| (m.key.clone(), m.price, m.annual_price)),
        );

        priced
            .into_iter()
            .filter(|(_, price, annual)| *annual > price.saturating_mul(12))
            .map(|(subject, price, annual)| {
                violation(
                    "annual_not_above_twelve_months",
                    &subject,
                    format!(
                        "'{}' annual price {} exceeds 12 x monthly price {}",
                        subject, annual, price
                    ),
                    ViolationSeverity::High,
                )
            })
            .collect()
    }

    /// Invariant 6: declared savings are not negative
    fn check_non_negative_savings(catalog: &Catalog) -> Vec<InvariantViolation> {
        catalog
            .solutions
            .iter()
            .filter(|s| s.savings < 0)
            .map(|s| {
                violation(
                    "non_negative_savings",
                    &s.id,
                    format!("Solution '{}' declares {}% savings", s.id, s.savings),
                    ViolationSeverity::Medium,
                )
            })
            .collect()
    }

    /// Invariant 7: declared savings match the catalog prices
    ///
    /// Computed on monthly prices, the figure the page advertises.
    fn check_solution_savings_consistent(catalog: &Catalog) -> Vec<InvariantViolation> {
        catalog
            .solutions
            .iter()
            .filter(|s| !s.modules.is_empty())
            .filter_map(|s| {
                let computed = s.computed_savings(catalog, BillingCycle::Monthly);
                if (computed - s.savings).abs() > SAVINGS_TOLERANCE {
                    Some(violation(
                        "solution_savings_consistent",
                        &s.id,
                        format!(
                            "Solution '{}' declares {}% savings but prices give {}%",
                            s.id, s.savings, computed
                        ),
                        ViolationSeverity::Low,
                    ))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Get list of all available invariant checks
    pub fn available_checks() -> Vec<&'static str> {
        vec![
            "unique_module_keys",
            "non_negative_prices",
            "values_within_bounds",
            "solution_modules_valid",
            "annual_not_above_twelve_months",
            "non_negative_savings",
            "solution_savings_consistent",
        ]
    }
}
