//! Catalog model
//!
//! Billing primitives sold on the pricing page: the base plan every customer
//! pays for, optional modules, pre-built solution bundles and extra seat packs.
//!
//! All prices are integer cents. Every entity stores its own monthly and
//! annual price; the yearly figure is read from `annual_price`, never derived
//! from the monthly one. Sums over catalog prices saturate instead of
//! overflowing.

use serde::{Deserialize, Serialize};

/// Billing cycle chosen by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Some(BillingCycle::Monthly),
            // "annual" is what older payloads used
            "yearly" | "year" | "annual" => Some(BillingCycle::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plan every subscription starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePlan {
    pub price: i64,
    pub annual_price: i64,
    /// Advertised discount for yearly billing, in percent
    #[serde(default)]
    pub yearly_discount: u8,
    pub users_included: u32,
    #[serde(default)]
    pub trial_days: u32,
}

impl BasePlan {
    pub fn price_for(&self, cycle: BillingCycle) -> i64 {
        match cycle {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.annual_price,
        }
    }
}

/// Quota bundled with a module (e.g. 500 invoices per month)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimit {
    pub resource: String,
    pub included: u64,
}

/// Individually priced capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePlan {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category colour tag used by the page to group modules
    #[serde(default)]
    pub color: String,
    pub price: i64,
    pub annual_price: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub limits: Vec<UsageLimit>,
}

impl ModulePlan {
    pub fn price_for(&self, cycle: BillingCycle) -> i64 {
        match cycle {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.annual_price,
        }
    }
}

/// Pre-built bundle of modules sold below the sum of its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    pub modules: Vec<String>,
    pub price: i64,
    pub annual_price: i64,
    /// Declared savings versus buying the modules separately, in percent
    #[serde(default)]
    pub savings: i64,
}

impl SolutionPlan {
    pub fn price_for(&self, cycle: BillingCycle) -> i64 {
        match cycle {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.annual_price,
        }
    }

    /// Sum of the constituent modules' prices. Unknown keys count as zero.
    pub fn modules_full_price(&self, catalog: &Catalog, cycle: BillingCycle) -> i64 {
        self.modules
            .iter()
            .filter_map(|key| catalog.module(key))
            .map(|module| module.price_for(cycle))
            .fold(0i64, |acc, price| acc.saturating_add(price))
    }

    /// Savings recomputed from the catalog: `round((1 - price / full) * 100)`
    ///
    /// Returns 0 when the bundle costs as much as (or more than) its parts, or
    /// when the parts are free.
    pub fn computed_savings(&self, catalog: &Catalog, cycle: BillingCycle) -> i64 {
        let full = self.modules_full_price(catalog, cycle);
        if full <= 0 {
            return 0;
        }
        let ratio = 1.0 - self.price_for(cycle) as f64 / full as f64;
        ((ratio * 100.0).round() as i64).max(0)
    }
}

/// Extra seats sold in fixed-size packs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPackPlan {
    pub size: u32,
    pub price: i64,
    pub annual_price: i64,
}

impl UserPackPlan {
    pub fn price_for(&self, cycle: BillingCycle) -> i64 {
        match cycle {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.annual_price,
        }
    }
}

/// Precomputed "every module" bundle (base plan not included)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllInBundle {
    pub price: i64,
    pub annual_price: i64,
}

impl AllInBundle {
    pub fn price_for(&self, cycle: BillingCycle) -> i64 {
        match cycle {
            BillingCycle::Monthly => self.price,
            BillingCycle::Yearly => self.annual_price,
        }
    }
}

/// Read-only description of everything that can be bought
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub base_plan: BasePlan,
    pub modules: Vec<ModulePlan>,
    #[serde(default)]
    pub solutions: Vec<SolutionPlan>,
    pub user_pack: UserPackPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_in: Option<AllInBundle>,
}

impl Catalog {
    pub fn module(&self, key: &str) -> Option<&ModulePlan> {
        self.modules.iter().find(|m| m.key == key)
    }

    pub fn contains_module(&self, key: &str) -> bool {
        self.module(key).is_some()
    }

    pub fn solution(&self, id: &str) -> Option<&SolutionPlan> {
        self.solutions.iter().find(|s| s.id == id)
    }

    pub fn base_price(&self, cycle: BillingCycle) -> i64 {
        self.base_plan.price_for(cycle)
    }

    /// Catalog keys in display order
    pub fn module_keys(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.key.as_str())
    }

    /// Sum of every module's price for the cycle, without any bundle discount
    pub fn all_modules_price(&self, cycle: BillingCycle) -> i64 {
        self.modules
            .iter()
            .map(|m| m.price_for(cycle))
            .fold(0i64, |acc, price| acc.saturating_add(price))
    }
}
