//! Selection state
//!
//! The customer's in-progress configuration. It starts empty, changes only
//! through the operations below, and is thrown away when the customer leaves
//! the page. Pricing never reads it implicitly: callers pass it to
//! [`crate::calculator::compute_summary`] together with the catalog.

use serde::{Deserialize, Serialize};

use crate::allocator;
use crate::catalog::{BillingCycle, Catalog};
use crate::defaults::MAX_USER_PACKS;

/// What a module toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Key is not in the catalog
    Ignored,
}

/// What a seat pack request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOutcome {
    Applied(u8),
    /// More packs than self-serve allows; capped and routed to sales
    ContactSales { requested: u32, applied: u8 },
}

impl PackOutcome {
    pub fn applied(&self) -> u8 {
        match self {
            PackOutcome::Applied(n) => *n,
            PackOutcome::ContactSales { applied, .. } => *applied,
        }
    }
}

/// Serialized form of a [`Selection`], accepted as-is and repaired on the way in
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SelectionWire {
    modules: Vec<String>,
    extra_user_packs: u32,
    billing_cycle: BillingCycle,
    free_module: Option<String>,
}

impl From<SelectionWire> for Selection {
    /// Drops duplicate keys, caps seat packs and re-runs free allocation.
    /// Keys unknown to the catalog are dropped later by [`Selection::reconcile`].
    fn from(wire: SelectionWire) -> Self {
        let mut modules: Vec<String> = Vec::with_capacity(wire.modules.len());
        for key in wire.modules {
            if !modules.contains(&key) {
                modules.push(key);
            }
        }

        let mut selection = Selection {
            modules,
            extra_user_packs: 0,
            billing_cycle: wire.billing_cycle,
            free_module: wire.free_module,
        };
        selection.set_extra_user_packs(wire.extra_user_packs);
        selection.reallocate_free_module();
        selection
    }
}

/// Customer choices on the pricing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SelectionWire")]
pub struct Selection {
    /// Selected module keys in insertion order
    modules: Vec<String>,
    extra_user_packs: u8,
    billing_cycle: BillingCycle,
    free_module: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.modules.iter().any(|m| m == key)
    }

    pub fn extra_user_packs(&self) -> u8 {
        self.extra_user_packs
    }

    pub fn billing_cycle(&self) -> BillingCycle {
        self.billing_cycle
    }

    pub fn free_module(&self) -> Option<&str> {
        self.free_module.as_deref()
    }

    /// Add `key` if absent, remove it if present
    pub fn toggle_module(&mut self, catalog: &Catalog, key: &str) -> ToggleOutcome {
        if !catalog.contains_module(key) {
            tracing::debug!(module = %key, "Ignoring toggle for module not in catalog");
            return ToggleOutcome::Ignored;
        }

        let outcome = if let Some(pos) = self.modules.iter().position(|m| m == key) {
            self.modules.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.modules.push(key.to_string());
            ToggleOutcome::Added
        };

        self.reallocate_free_module();
        tracing::debug!(
            module = %key,
            outcome = ?outcome,
            free_module = ?self.free_module,
            selected = self.modules.len(),
            "Toggled module"
        );
        outcome
    }

    pub fn set_billing_cycle(&mut self, cycle: BillingCycle) {
        self.billing_cycle = cycle;
    }

    /// Set the number of extra seat packs, capped at [`MAX_USER_PACKS`]
    pub fn set_extra_user_packs(&mut self, requested: u32) -> PackOutcome {
        if requested > u32::from(MAX_USER_PACKS) {
            self.extra_user_packs = MAX_USER_PACKS;
            tracing::info!(
                requested = requested,
                applied = MAX_USER_PACKS,
                "Seat packs above self-serve limit, directing to sales"
            );
            return PackOutcome::ContactSales {
                requested,
                applied: MAX_USER_PACKS,
            };
        }

        // requested <= MAX_USER_PACKS, fits in u8
        self.extra_user_packs = requested as u8;
        PackOutcome::Applied(self.extra_user_packs)
    }

    /// Replace the whole module selection
    ///
    /// Keys not in the catalog are dropped, duplicates keep their first
    /// position. The first remaining key becomes the free module.
    pub fn select_bundle<I>(&mut self, catalog: &Catalog, keys: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut modules: Vec<String> = Vec::new();
        for key in keys {
            let key = key.as_ref();
            if catalog.contains_module(key) && !modules.iter().any(|m| m == key) {
                modules.push(key.to_string());
            }
        }

        self.modules = modules;
        self.free_module = None;
        self.reallocate_free_module();
        tracing::debug!(
            selected = self.modules.len(),
            free_module = ?self.free_module,
            "Selected bundle"
        );
    }

    /// Select a catalog solution's modules. Returns false for an unknown id.
    pub fn select_solution(&mut self, catalog: &Catalog, solution_id: &str) -> bool {
        match catalog.solution(solution_id) {
            Some(solution) => {
                self.select_bundle(catalog, &solution.modules);
                true
            }
            None => {
                tracing::debug!(solution = %solution_id, "Unknown solution");
                false
            }
        }
    }

    pub fn clear_modules(&mut self) {
        self.modules.clear();
        self.free_module = None;
    }

    /// Drop keys the catalog does not sell and re-run free allocation
    ///
    /// Needed after deserializing a selection saved against another catalog.
    /// Returns the number of keys dropped.
    pub fn reconcile(&mut self, catalog: &Catalog) -> usize {
        let before = self.modules.len();
        self.modules.retain(|key| catalog.contains_module(key));
        let dropped = before - self.modules.len();
        if dropped > 0 {
            tracing::debug!(
                dropped = dropped,
                remaining = self.modules.len(),
                "Dropped modules missing from catalog"
            );
        }
        self.reallocate_free_module();
        dropped
    }

    fn reallocate_free_module(&mut self) {
        self.free_module = allocator::allocate(&self.modules, self.free_module.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::default_catalog()
    }

    #[test]
    fn test_new_selection_is_empty() {
        let selection = Selection::new();
        assert!(selection.modules().is_empty());
        assert_eq!(selection.extra_user_packs(), 0);
        assert_eq!(selection.billing_cycle(), BillingCycle::Monthly);
        assert_eq!(selection.free_module(), None);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let catalog = catalog();
        let mut selection = Selection::new();

        assert_eq!(selection.toggle_module(&catalog, "crm"), ToggleOutcome::Added);
        assert!(selection.is_selected("crm"));
        assert_eq!(selection.free_module(), Some("crm"));

        assert_eq!(selection.toggle_module(&catalog, "crm"), ToggleOutcome::Removed);
        assert!(!selection.is_selected("crm"));
        assert_eq!(selection.free_module(), None);
    }

    #[test]
    fn test_toggle_unknown_key_is_noop() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "crm");
        let before = selection.clone();

        assert_eq!(
            selection.toggle_module(&catalog, "payroll"),
            ToggleOutcome::Ignored
        );
        assert_eq!(selection, before);
    }

    #[test]
    fn test_removing_free_module_reassigns_to_earliest() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "crm");
        selection.toggle_module(&catalog, "hr");
        selection.toggle_module(&catalog, "projects");

        selection.toggle_module(&catalog, "crm");
        assert_eq!(selection.free_module(), Some("hr"));
    }

    #[test]
    fn test_readded_module_goes_to_back() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "crm");
        selection.toggle_module(&catalog, "hr");
        selection.toggle_module(&catalog, "crm");
        selection.toggle_module(&catalog, "crm");

        assert_eq!(selection.modules(), &["hr".to_string(), "crm".to_string()]);
        assert_eq!(selection.free_module(), Some("hr"));
    }

    #[test]
    fn test_extra_user_packs_within_limit() {
        let mut selection = Selection::new();
        assert_eq!(selection.set_extra_user_packs(2), PackOutcome::Applied(2));
        assert_eq!(selection.extra_user_packs(), 2);
        assert_eq!(selection.set_extra_user_packs(0), PackOutcome::Applied(0));
        assert_eq!(selection.extra_user_packs(), 0);
    }

    #[test]
    fn test_extra_user_packs_capped() {
        let mut selection = Selection::new();
        let outcome = selection.set_extra_user_packs(10);
        assert_eq!(
            outcome,
            PackOutcome::ContactSales {
                requested: 10,
                applied: 3
            }
        );
        assert_eq!(outcome.applied(), 3);
        assert_eq!(selection.extra_user_packs(), 3);
    }

    #[test]
    fn test_set_billing_cycle() {
        let mut selection = Selection::new();
        selection.set_billing_cycle(BillingCycle::Yearly);
        assert_eq!(selection.billing_cycle(), BillingCycle::Yearly);
    }

    #[test]
    fn test_select_bundle_replaces_selection() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "hr");

        selection.select_bundle(&catalog, ["inventory", "payroll", "crm", "inventory"]);
        assert_eq!(
            selection.modules(),
            &["inventory".to_string(), "crm".to_string()]
        );
        assert_eq!(selection.free_module(), Some("inventory"));
    }

    #[test]
    fn test_select_bundle_with_no_valid_keys() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "hr");

        selection.select_bundle(&catalog, ["payroll"]);
        assert!(selection.modules().is_empty());
        assert_eq!(selection.free_module(), None);
    }

    #[test]
    fn test_select_solution() {
        let catalog = catalog();
        let mut selection = Selection::new();

        assert!(selection.select_solution(&catalog, "finance"));
        assert_eq!(
            selection.modules(),
            &["accounting".to_string(), "invoicing".to_string()]
        );
        assert_eq!(selection.free_module(), Some("accounting"));

        assert!(!selection.select_solution(&catalog, "nope"));
        assert_eq!(selection.modules().len(), 2);
    }

    #[test]
    fn test_clear_modules_keeps_cycle_and_packs() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "hr");
        selection.set_extra_user_packs(1);
        selection.set_billing_cycle(BillingCycle::Yearly);

        selection.clear_modules();
        assert!(selection.modules().is_empty());
        assert_eq!(selection.free_module(), None);
        assert_eq!(selection.extra_user_packs(), 1);
        assert_eq!(selection.billing_cycle(), BillingCycle::Yearly);
    }

    #[test]
    fn test_selection_serializes() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.toggle_module(&catalog, "crm");

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["modules"][0], "crm");
        assert_eq!(json["freeModule"], "crm");
        assert_eq!(json["billingCycle"], "monthly");

        let back: Selection = serde_json::from_value(json).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn test_deserialize_repairs_tampered_state() {
        let json = serde_json::json!({
            "modules": ["crm", "hr", "crm"],
            "extraUserPacks": 200,
            "billingCycle": "yearly",
            "freeModule": "hr"
        });

        let selection: Selection = serde_json::from_value(json).unwrap();
        assert_eq!(selection.modules(), ["crm".to_string(), "hr".to_string()]);
        assert_eq!(selection.extra_user_packs(), MAX_USER_PACKS);
        assert_eq!(selection.billing_cycle(), BillingCycle::Yearly);
        assert_eq!(selection.free_module(), Some("crm"));
        assert!(allocator::holds(selection.modules(), selection.free_module()));

        let summary = crate::calculator::compute_summary(&catalog(), &selection);
        assert_eq!(summary.total_users, 5 + 3 * 5);
        assert_eq!(summary.modules.iter().filter(|m| m.free).count(), 1);
    }

    #[test]
    fn test_deserialize_empty_object() {
        let selection: Selection = serde_json::from_str("{}").unwrap();
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn test_deserialize_drops_free_module_for_empty_selection() {
        let selection: Selection =
            serde_json::from_str(r#"{"modules": [], "freeModule": "crm"}"#).unwrap();
        assert_eq!(selection.free_module(), None);
    }

    #[test]
    fn test_reconcile_drops_unknown_keys() {
        let catalog = catalog();
        let mut selection: Selection =
            serde_json::from_str(r#"{"modules": ["payroll", "crm", "hr"]}"#).unwrap();
        assert_eq!(selection.free_module(), Some("payroll"));

        assert_eq!(selection.reconcile(&catalog), 1);
        assert_eq!(selection.modules(), ["crm".to_string(), "hr".to_string()]);
        assert_eq!(selection.free_module(), Some("crm"));
        assert_eq!(selection.reconcile(&catalog), 0);
    }
}
