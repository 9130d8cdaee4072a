//! # View State
//!
//! Which CRUD view is active. The selected customer lives inside the
//! variant, so a modal view can never exist without its subject.
//!
//! ```text
//!            ┌──────────── OpenAdd ───────────▶ Add ─────┐
//!            │                                           │
//!   List ────┼── OpenEdit(id) ──▶ Edit(c) ◀──┐           │ save / cancel
//!    ▲       │                               │ edit      │
//!    │       ├── OpenDetails(id) ▶ Details(c)┤           │
//!    │       │                               │ delete    │
//!    │       └── OpenDelete(id) ─▶ Delete(c) ◀┘           │
//!    └───────────────────────────────────────────────────┘
//! ```
//!
//! Transitions live in `action::update`; this module is just the shape.

use crate::core::model::Customer;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    List,
    Add,
    Edit(Customer),
    Details(Customer),
    Delete(Customer),
}

impl ViewState {
    /// The customer this view is about, if any.
    pub fn selected(&self) -> Option<&Customer> {
        match self {
            ViewState::List | ViewState::Add => None,
            ViewState::Edit(c) | ViewState::Details(c) | ViewState::Delete(c) => Some(c),
        }
    }

    pub fn is_modal(&self) -> bool {
        !matches!(self, ViewState::List)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewState::List => "list",
            ViewState::Add => "add",
            ViewState::Edit(_) => "edit",
            ViewState::Details(_) => "details",
            ViewState::Delete(_) => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CustomerStatus;
    use crate::test_support::customer;

    #[test]
    fn test_selected_only_in_entity_views() {
        let c = customer("1", "Ann", CustomerStatus::Active);
        assert!(ViewState::List.selected().is_none());
        assert!(ViewState::Add.selected().is_none());
        assert_eq!(ViewState::Edit(c.clone()).selected(), Some(&c));
        assert_eq!(ViewState::Details(c.clone()).selected(), Some(&c));
        assert_eq!(ViewState::Delete(c.clone()).selected(), Some(&c));
    }

    #[test]
    fn test_default_is_list() {
        assert_eq!(ViewState::default(), ViewState::List);
        assert!(!ViewState::default().is_modal());
        assert!(ViewState::Add.is_modal());
    }
}
