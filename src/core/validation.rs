//! # Customer Form Validation
//!
//! `validate()` checks a `CustomerDraft` and returns every problem at once,
//! keyed by field. An empty map means the draft may be saved. Validation
//! never fails with an `Err`; bad input is data, not an exception.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::{Customer, CustomerStatus};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex")
});

// Digits, spaces, hyphens, parentheses, optional leading '+'.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("static phone regex"));

/// Punctuation does not count toward a phone number's length.
const MIN_PHONE_DIGITS: usize = 10;

fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
        && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::Value => "value",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// Unsaved form contents. Text fields hold exactly what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: CustomerStatus,
    pub value: String,
    pub avatar: String,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            status: CustomerStatus::Prospect,
            value: String::new(),
            avatar: String::new(),
        }
    }
}

impl CustomerDraft {
    /// Prefill a draft from an existing customer (edit flow).
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            company: customer.company.clone(),
            status: customer.status,
            value: format_value_input(customer.value),
            avatar: customer.avatar.clone().unwrap_or_default(),
        }
    }

    /// Validate and normalize in one pass. On failure the errors are
    /// exactly what `validate()` reports.
    pub fn into_fields(self) -> Result<DraftFields, FieldErrors> {
        let (errors, value) = check(&self);
        let value = match value {
            Some(value) if errors.is_empty() => value,
            _ => return Err(errors),
        };
        let avatar = self.avatar.trim();
        Ok(DraftFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
            status: self.status,
            value,
            avatar: (!avatar.is_empty()).then(|| avatar.to_string()),
        })
    }
}

/// Validated and normalized draft contents.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: CustomerStatus,
    pub value: f64,
    pub avatar: Option<String>,
}

fn format_value_input(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Check every field of `draft`.
pub fn validate(draft: &CustomerDraft) -> FieldErrors {
    check(draft).0
}

/// Field errors plus the parsed value, when it parses.
fn check(draft: &CustomerDraft) -> (FieldErrors, Option<f64>) {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, "Name is required".to_string());
    } else if name.chars().count() < 2 {
        errors.insert(Field::Name, "Name must be at least 2 characters".to_string());
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required".to_string());
    } else if !EMAIL_RE.is_match(draft.email.trim()) {
        errors.insert(Field::Email, "Please enter a valid email address".to_string());
    }

    if draft.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone number is required".to_string());
    } else if !is_valid_phone(draft.phone.trim()) {
        errors.insert(Field::Phone, "Please enter a valid phone number".to_string());
    }

    if draft.company.trim().is_empty() {
        errors.insert(Field::Company, "Company is required".to_string());
    }

    let value = parse_value(&draft.value);
    if draft.value.trim().is_empty() {
        errors.insert(Field::Value, "Customer value is required".to_string());
    } else if value.is_none() {
        errors.insert(Field::Value, "Please enter a valid positive number".to_string());
    }

    (errors, value)
}
