//! # Application State
//!
//! Core business state for the CRM. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── customers: Vec<Customer>       // the record set (only update() mutates it)
//! ├── deals / activities             // read-only context for the details view
//! ├── view: ViewState                // list / add / edit / details / delete
//! ├── query: QuerySpec               // search, filter, sort, page
//! ├── pending: Option<StoreRequest>  // in-flight store call (busy flag)
//! ├── form_errors: FieldErrors       // last failed validation
//! ├── status_message: String         // status bar text
//! ├── error: Option<String>          // last store failure
//! └── ids: IdAllocator               // new customer ids
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{Local, NaiveDate};

use crate::core::config::ResolvedConfig;
use crate::core::ids::{IdAllocator, IdPolicy};
use crate::core::model::{Activity, Customer, Deal};
use crate::core::query::{self, QuerySpec, VisiblePage};
use crate::core::seed::Dataset;
use crate::core::validation::FieldErrors;
use crate::core::view::ViewState;
use crate::store::StoreRequest;

pub struct App {
    pub customers: Vec<Customer>,
    pub deals: Vec<Deal>,
    pub activities: Vec<Activity>,
    pub view: ViewState,
    pub query: QuerySpec,
    /// The store call in flight, if any. While set, saves, deletes,
    /// cancels and view changes are refused.
    pub pending: Option<StoreRequest>,
    pub form_errors: FieldErrors,
    pub status_message: String,
    pub error: Option<String>,
    pub ids: IdAllocator,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(dataset: Dataset, page_size: usize, id_policy: IdPolicy) -> Self {
        let ids = IdAllocator::new(id_policy, &dataset.customers);
        Self {
            customers: dataset.customers,
            deals: dataset.deals,
            activities: dataset.activities,
            view: ViewState::List,
            query: QuerySpec::with_page_size(page_size),
            pending: None,
            form_errors: FieldErrors::new(),
            status_message: String::from("Welcome to CRM!"),
            error: None,
            ids,
            clock: local_today,
        }
    }

    pub fn from_config(dataset: Dataset, config: &ResolvedConfig) -> Self {
        Self::new(dataset, config.page_size, config.id_policy)
    }

    /// Replace the date source used for `created_at` / `last_contact`.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// The list page for the current query.
    pub fn visible(&self) -> VisiblePage<'_> {
        query::compute_visible(&self.customers, &self.query)
    }

    /// Pull `query.page` back inside the valid range for the current
    /// record set and filters.
    pub fn clamp_page(&mut self) {
        let matches = self
            .customers
            .iter()
            .filter(|c| self.query.matches(c))
            .count();
        let pages = query::total_pages(matches, self.query.page_size);
        self.query.page = query::clamp_page(self.query.page, pages);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::model::CustomerStatus;
    use crate::test_support::{customer, test_app, test_today};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to CRM!");
        assert!(!app.is_busy());
        assert!(!app.view.is_modal());
        assert_eq!(app.query.page, 1);
        assert_eq!(app.today(), test_today());
    }

    #[test]
    fn test_find() {
        let app = test_app();
        assert!(app.find("1").is_some());
        assert!(app.find("missing").is_none());
    }

    #[test]
    fn test_clamp_page_after_shrink() {
        let mut app = test_app();
        app.query.page_size = 1;
        app.query.page = 3;
        app.customers.truncate(2);
        app.clamp_page();
        assert_eq!(app.query.page, 2);

        app.customers.clear();
        app.clamp_page();
        assert_eq!(app.query.page, 1);

        app.customers.push(customer("9", "Zed", CustomerStatus::Active));
        app.clamp_page();
        assert_eq!(app.query.page, 1);
    }
}
