//! Free module allocation
//!
//! One selected module is always free. The rule is: the free module is the
//! earliest-inserted key still present in the selection. Selections keep
//! their keys in insertion order, so that is simply the first entry, and a
//! key that is removed and added again goes to the back of the queue.

/// Pick the free module for `selected`
///
/// `current` is kept only while it is still the earliest entry; otherwise
/// the slot moves to the first key. An empty selection has no free module.
pub fn allocate(selected: &[String], current: Option<&str>) -> Option<String> {
    let first = selected.first()?;
    match current {
        Some(key) if key == first => Some(key.to_string()),
        _ => Some(first.clone()),
    }
}

/// Whether `free` is a valid allocation for `selected`
///
/// Holds when the selection is empty and nothing is free, or when the free
/// module is the first selected key.
pub fn holds(selected: &[String], free: Option<&str>) -> bool {
    match (selected.first(), free) {
        (None, None) => true,
        (Some(first), Some(key)) => first == key,
        _ => false,
    }
}
