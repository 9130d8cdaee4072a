//! # Record Source
//!
//! Loads the customers, deals, and activities the session starts with.
//! Either a user-supplied JSON file or the dataset bundled into the binary.
//! Records are trusted as loaded; only user edits go through validation.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::model::{Activity, Customer, Deal};

const BUNDLED_SEED: &str = include_str!("../../data/seed.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "data file I/O error: {e}"),
            DataError::Parse(e) => write!(f, "data file parse error: {e}"),
        }
    }
}

impl std::error::Error for DataError {}

/// The dataset compiled into the binary.
pub fn bundled() -> Result<Dataset, DataError> {
    parse(BUNDLED_SEED)
}

/// Load a dataset from a JSON file.
pub fn load(path: &Path) -> Result<Dataset, DataError> {
    let contents = fs::read_to_string(path).map_err(DataError::Io)?;
    let dataset = parse(&contents)?;
    info!(
        "Loaded {} customers, {} deals, {} activities from {}",
        dataset.customers.len(),
        dataset.deals.len(),
        dataset.activities.len(),
        path.display()
    );
    Ok(dataset)
}

/// Load from `path` when given, otherwise the bundled dataset.
pub fn load_or_bundled(path: Option<&Path>) -> Result<Dataset, DataError> {
    match path {
        Some(p) => load(p),
        None => {
            info!("No data file configured, using bundled seed data");
            bundled()
        }
    }
}

fn parse(json: &str) -> Result<Dataset, DataError> {
    let dataset: Dataset = serde_json::from_str(json).map_err(DataError::Parse)?;
    warn_duplicate_ids(&dataset.customers);
    Ok(dataset)
}

fn warn_duplicate_ids(customers: &[Customer]) {
    let mut seen = HashSet::new();
    for c in customers {
        if !seen.insert(c.id.as_str()) {
            warn!("Duplicate customer id in record source: {}", c.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seed_parses() {
        let dataset = bundled().unwrap();
        assert_eq!(dataset.customers.len(), 5);
        assert_eq!(dataset.deals.len(), 5);
        assert_eq!(dataset.activities.len(), 5);
        assert!(dataset
            .deals
            .iter()
            .all(|d| dataset.customers.iter().any(|c| c.id == d.customer_id)));
    }

    #[test]
    fn test_deals_and_activities_are_optional() {
        let dataset = parse(r#"{"customers": []}"#).unwrap();
        assert!(dataset.customers.is_empty());
        assert!(dataset.deals.is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse("{ nope").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
        assert!(err.to_string().starts_with("data file parse error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(Path::new("/definitely/not/here/seed.json")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
