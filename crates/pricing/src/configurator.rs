//! Configurator
//!
//! Owns one catalog and one selection for the lifetime of a page view and
//! forwards user actions to them. Pricing stays in the pure functions of
//! [`crate::calculator`]; this type only keeps the two inputs together.

use crate::calculator::{compare_cycles, compute_summary, CycleComparison, PricingSummary};
use crate::catalog::{BillingCycle, Catalog};
use crate::loader::CatalogLoader;
use crate::selection::{PackOutcome, Selection, ToggleOutcome};

#[derive(Debug, Clone)]
pub struct Configurator {
    catalog: Catalog,
    selection: Selection,
}

impl Configurator {
    /// Start with an empty selection
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
        }
    }

    /// Resume a saved selection, dropping modules the catalog no longer sells
    pub fn with_selection(catalog: Catalog, mut selection: Selection) -> Self {
        selection.reconcile(&catalog);
        Self { catalog, selection }
    }

    /// Load the catalog (with fallback) and start with an empty selection
    pub async fn load(loader: &CatalogLoader) -> Self {
        Self::new(loader.load().await)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_module(&mut self, key: &str) -> ToggleOutcome {
        self.selection.toggle_module(&self.catalog, key)
    }

    pub fn set_billing_cycle(&mut self, cycle: BillingCycle) {
        self.selection.set_billing_cycle(cycle);
    }

    pub fn set_extra_user_packs(&mut self, requested: u32) -> PackOutcome {
        self.selection.set_extra_user_packs(requested)
    }

    pub fn select_bundle<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.selection.select_bundle(&self.catalog, keys);
    }

    pub fn select_solution(&mut self, solution_id: &str) -> bool {
        self.selection.select_solution(&self.catalog, solution_id)
    }

    pub fn summary(&self) -> PricingSummary {
        compute_summary(&self.catalog, &self.selection)
    }

    pub fn cycle_comparison(&self) -> CycleComparison {
        compare_cycles(&self.catalog, &self.selection)
    }

    /// Copy of the current selection, e.g. to hand to a checkout
    pub fn snapshot(&self) -> Selection {
        self.selection.clone()
    }
}
