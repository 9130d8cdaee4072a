//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::NaiveDate;

use crate::core::ids::IdPolicy;
use crate::core::model::{Customer, CustomerStatus};
use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::core::seed;
use crate::core::state::App;

/// The fixed "today" every test app reports.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")
}

/// A minimal valid customer with the given id, name, and status.
pub fn customer(id: &str, name: &str, status: CustomerStatus) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "+1 (555) 000-0000".to_string(),
        company: "Example Co".to_string(),
        status,
        value: 0.0,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        last_contact: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        avatar: None,
    }
}

/// Creates a test App over the bundled seed data with a fixed clock.
pub fn test_app() -> App {
    let dataset = seed::bundled().expect("bundled seed parses");
    App::new(dataset, DEFAULT_PAGE_SIZE, IdPolicy::Sequential).with_clock(test_today)
}
