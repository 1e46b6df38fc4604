//! Built-in catalog
//!
//! Served whenever the pricing service cannot be reached or returns something
//! unusable, so the pricing page always has figures to show.
//!
//! Prices are in cents. Annual prices are ten months' worth (two months free).

use crate::catalog::{
    AllInBundle, BasePlan, Catalog, ModulePlan, SolutionPlan, UsageLimit, UserPackPlan,
};

/// Maximum extra seat packs before the customer is sent to sales
pub const MAX_USER_PACKS: u8 = 3;

fn module(
    key: &str,
    name: &str,
    description: &str,
    color: &str,
    price: i64,
    limits: &[(&str, u64)],
) -> ModulePlan {
    ModulePlan {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        price,
        annual_price: price * 10,
        limits: limits
            .iter()
            .map(|(resource, included)| UsageLimit {
                resource: resource.to_string(),
                included: *included,
            })
            .collect(),
    }
}

fn solution(
    id: &str,
    name: &str,
    description: &str,
    color: &str,
    modules: &[&str],
    price: i64,
    savings: i64,
) -> SolutionPlan {
    SolutionPlan {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        modules: modules.iter().map(|m| m.to_string()).collect(),
        price,
        annual_price: price * 10,
        savings,
    }
}

impl Catalog {
    /// Catalog embedded in the binary
    pub fn default_catalog() -> Self {
        Self {
            base_plan: BasePlan {
                price: 900,
                annual_price: 9_000,
                yearly_discount: 17,
                users_included: 5,
                trial_days: 14,
            },
            modules: vec![
                module(
                    "invoicing",
                    "Invoicing",
                    "Quotes, invoices and payment reminders",
                    "blue",
                    1_500,
                    &[("invoices", 500)],
                ),
                module(
                    "crm",
                    "CRM",
                    "Contacts, pipeline and follow-ups",
                    "purple",
                    2_000,
                    &[("contacts", 5_000)],
                ),
                module(
                    "inventory",
                    "Inventory",
                    "Stock levels, warehouses and reorder alerts",
                    "orange",
                    1_500,
                    &[("products", 1_000)],
                ),
                module(
                    "projects",
                    "Projects",
                    "Tasks, timesheets and project billing",
                    "green",
                    1_200,
                    &[],
                ),
                module(
                    "accounting",
                    "Accounting",
                    "Bookkeeping, bank reconciliation and VAT returns",
                    "teal",
                    2_500,
                    &[],
                ),
                module(
                    "ecommerce",
                    "E-commerce",
                    "Online store synced with stock and invoicing",
                    "pink",
                    2_000,
                    &[("orders", 1_000)],
                ),
                module(
                    "hr",
                    "HR",
                    "Employees, leave and expense reports",
                    "yellow",
                    1_500,
                    &[],
                ),
                module(
                    "helpdesk",
                    "Helpdesk",
                    "Shared inbox and customer tickets",
                    "red",
                    1_000,
                    &[("tickets", 1_000)],
                ),
            ],
            solutions: vec![
                solution(
                    "commerce",
                    "Commerce",
                    "Sell online and keep stock and invoices in sync",
                    "pink",
                    &["ecommerce", "inventory", "invoicing"],
                    4_000,
                    20,
                ),
                solution(
                    "services",
                    "Services",
                    "Win clients, deliver projects and support them",
                    "purple",
                    &["crm", "projects", "invoicing", "helpdesk"],
                    4_500,
                    21,
                ),
                solution(
                    "finance",
                    "Finance",
                    "Invoicing and bookkeeping in one place",
                    "teal",
                    &["accounting", "invoicing"],
                    3_400,
                    15,
                ),
            ],
            user_pack: UserPackPlan {
                size: 5,
                price: 1_500,
                annual_price: 15_000,
            },
            all_in: Some(AllInBundle {
                price: 9_900,
                annual_price: 99_000,
            }),
        }
    }
}
