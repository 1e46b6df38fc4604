//! Pricing calculator
//!
//! Pure projection from a catalog and a selection to the figures the pricing
//! page shows. No I/O, no hidden state: the same inputs always give the same
//! summary, so it is safe to recompute on every toggle.

use serde::Serialize;

use crate::catalog::{BillingCycle, Catalog, UsageLimit};
use crate::selection::Selection;

/// One selected module on the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleLineItem {
    pub key: String,
    pub name: String,
    /// Nominal price for the cycle, shown even when the module is free
    pub price: i64,
    pub free: bool,
}

/// "Take every module" upsell figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllInOffer {
    /// What the customer would pay for base plan plus every module
    pub price: i64,
    /// Base plan plus every module at list price
    pub regular: i64,
    pub savings_percent: i64,
}

/// Everything the summary panel needs for one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub billing_cycle: BillingCycle,
    pub base_price: i64,
    pub modules: Vec<ModuleLineItem>,
    /// Extra seat packs total
    pub users_total: i64,
    pub total: i64,
    /// Included plus purchased seats
    pub total_users: u32,
    pub module_count: usize,
    pub all_in: AllInOffer,
    /// Only true when some but not all modules are selected
    pub offer_all_in: bool,
    pub trial_days: u32,
    /// Quotas bundled with the selected modules, per resource
    pub limits: Vec<UsageLimit>,
}

impl PricingSummary {
    /// Sum of the nominal price of free line items
    pub fn free_amount(&self) -> i64 {
        self.modules
            .iter()
            .filter(|m| m.free)
            .fold(0i64, |acc, m| acc.saturating_add(m.price))
    }
}

/// Monthly against yearly for the same selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleComparison {
    pub monthly_total: i64,
    pub yearly_total: i64,
    /// Twelve monthly payments minus one yearly payment
    pub yearly_savings: i64,
    pub savings_percent: i64,
}

fn savings_percent(price: i64, regular: i64) -> i64 {
    if regular <= 0 {
        return 0;
    }
    let ratio = 1.0 - price as f64 / regular as f64;
    ((ratio * 100.0).round() as i64).max(0)
}

fn all_in_offer(catalog: &Catalog, cycle: BillingCycle) -> AllInOffer {
    let base = catalog.base_price(cycle);
    let regular = base.saturating_add(catalog.all_modules_price(cycle));
    let price = match &catalog.all_in {
        Some(bundle) => base.saturating_add(bundle.price_for(cycle)).min(regular),
        None => regular,
    };

    AllInOffer {
        price,
        regular,
        savings_percent: savings_percent(price, regular),
    }
}

fn aggregate_limits(catalog: &Catalog, selection: &Selection) -> Vec<UsageLimit> {
    let mut limits: Vec<UsageLimit> = Vec::new();
    for module in selection
        .modules()
        .iter()
        .filter_map(|key| catalog.module(key))
    {
        for limit in &module.limits {
            match limits.iter_mut().find(|l| l.resource == limit.resource) {
                Some(existing) => {
                    existing.included = existing.included.saturating_add(limit.included)
                }
                None => limits.push(limit.clone()),
            }
        }
    }
    limits
}

/// Price `selection` against `catalog`
///
/// Selected keys missing from the catalog are skipped.
pub fn compute_summary(catalog: &Catalog, selection: &Selection) -> PricingSummary {
    let cycle = selection.billing_cycle();
    let base_price = catalog.base_price(cycle);
    let free_module = selection.free_module();

    let modules: Vec<ModuleLineItem> = selection
        .modules()
        .iter()
        .filter_map(|key| catalog.module(key))
        .map(|module| ModuleLineItem {
            key: module.key.clone(),
            name: module.name.clone(),
            price: module.price_for(cycle),
            free: free_module == Some(module.key.as_str()),
        })
        .collect();

    let modules_total = modules
        .iter()
        .filter(|m| !m.free)
        .fold(0i64, |acc, m| acc.saturating_add(m.price));
    let packs = selection.extra_user_packs();
    let users_total = i64::from(packs).saturating_mul(catalog.user_pack.price_for(cycle));
    let total_users = catalog
        .base_plan
        .users_included
        .saturating_add(u32::from(packs).saturating_mul(catalog.user_pack.size));

    let module_count = modules.len();
    let offer_all_in = module_count > 0 && module_count < catalog.modules.len();

    PricingSummary {
        billing_cycle: cycle,
        base_price,
        users_total,
        total: base_price
            .saturating_add(modules_total)
            .saturating_add(users_total),
        total_users,
        module_count,
        all_in: all_in_offer(catalog, cycle),
        offer_all_in,
        trial_days: catalog.base_plan.trial_days,
        limits: aggregate_limits(catalog, selection),
        modules,
    }
}

/// Totals for both cycles, leaving `selection` untouched
pub fn compare_cycles(catalog: &Catalog, selection: &Selection) -> CycleComparison {
    let mut monthly = selection.clone();
    monthly.set_billing_cycle(BillingCycle::Monthly);
    let mut yearly = selection.clone();
    yearly.set_billing_cycle(BillingCycle::Yearly);

    let monthly_total = compute_summary(catalog, &monthly).total;
    let yearly_total = compute_summary(catalog, &yearly).total;
    let twelve_months = monthly_total.saturating_mul(12);

    CycleComparison {
        monthly_total,
        yearly_total,
        yearly_savings: twelve_months.saturating_sub(yearly_total).max(0),
        savings_percent: savings_percent(yearly_total, twelve_months),
    }
}
