//! Selection coordinator. One selected item id per panel, shared between panels.
//!
//! Reads are synchronous and observe the latest write immediately. No history and no
//! multi-select: writing a panel's slot replaces whatever was there.

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    slots: RwLock<HashMap<String, String>>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `item_id` as the selection for `panel`. Last write wins.
    pub fn set_selection(&self, panel: &str, item_id: &str) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(panel.to_string(), item_id.to_string());
        debug!(panel, item_id, "selection set");
    }

    /// Current selection for `panel`, if any.
    pub fn get_selection(&self, panel: &str) -> Option<String> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.get(panel).cloned()
    }

    /// Drop the selection for `panel`. Called when the panel's collection is replaced.
    pub fn clear(&self, panel: &str) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        if slots.remove(panel).is_some() {
            debug!(panel, "selection cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let sel = SelectionCoordinator::new();
        sel.set_selection("legislation", "HR123");
        assert_eq!(sel.get_selection("legislation").as_deref(), Some("HR123"));
        assert_eq!(sel.get_selection("other_panel"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let sel = SelectionCoordinator::new();
        sel.set_selection("legislation", "HR1");
        sel.set_selection("legislation", "S2");
        assert_eq!(sel.get_selection("legislation").as_deref(), Some("S2"));
    }

    #[test]
    fn test_panels_are_independent() {
        let sel = SelectionCoordinator::new();
        sel.set_selection("legislation", "HR1");
        sel.set_selection("executive_orders", "2025-01234");
        sel.clear("legislation");

        assert_eq!(sel.get_selection("legislation"), None);
        assert_eq!(
            sel.get_selection("executive_orders").as_deref(),
            Some("2025-01234")
        );
    }
}
