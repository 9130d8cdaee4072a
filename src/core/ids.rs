//! # Customer Id Allocation
//!
//! New customers need an id that no current record uses. Two policies:
//!
//! - `Sequential`: a counter seeded with `max(numeric ids) + 1`. It only
//!   moves forward, so deleting the highest-id customer and then adding a
//!   new one never reissues the deleted id.
//! - `Uuid`: random v4 UUID strings.

use serde::{Deserialize, Serialize};

use crate::core::model::Customer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    #[default]
    Sequential,
    Uuid,
}

#[derive(Debug, Clone)]
pub struct IdAllocator {
    policy: IdPolicy,
    next: u64,
}

impl IdAllocator {
    /// Seed the allocator from the records present at startup.
    /// Non-numeric ids are ignored for seeding.
    pub fn new(policy: IdPolicy, existing: &[Customer]) -> Self {
        let max = existing
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            policy,
            next: max + 1,
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Hand out an id not used by any record in `current`.
    pub fn allocate(&mut self, current: &[Customer]) -> String {
        match self.policy {
            IdPolicy::Uuid => loop {
                let id = uuid::Uuid::new_v4().to_string();
                if !current.iter().any(|c| c.id == id) {
                    return id;
                }
            },
            IdPolicy::Sequential => loop {
                let id = self.next.to_string();
                self.next += 1;
                // Records loaded after seeding may already hold this number.
                if !current.iter().any(|c| c.id == id) {
                    return id;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CustomerStatus;
    use crate::test_support::customer;

    #[test]
    fn test_empty_set_starts_at_one() {
        let mut ids = IdAllocator::new(IdPolicy::Sequential, &[]);
        assert_eq!(ids.allocate(&[]), "1");
        assert_eq!(ids.allocate(&[]), "2");
    }

    #[test]
    fn test_seeds_past_max_numeric_id() {
        let records = vec![
            customer("3", "A", CustomerStatus::Active),
            customer("10", "B", CustomerStatus::Active),
            customer("legacy-x", "C", CustomerStatus::Active),
        ];
        let mut ids = IdAllocator::new(IdPolicy::Sequential, &records);
        assert_eq!(ids.allocate(&records), "11");
    }

    #[test]
    fn test_deleted_max_id_is_not_reused() {
        let mut records = vec![
            customer("1", "A", CustomerStatus::Active),
            customer("2", "B", CustomerStatus::Active),
        ];
        let mut ids = IdAllocator::new(IdPolicy::Sequential, &records);
        let third = ids.allocate(&records);
        assert_eq!(third, "3");
        records.push(customer(&third, "C", CustomerStatus::Active));

        // Delete the max holder, then add again.
        records.retain(|c| c.id != "3");
        let fourth = ids.allocate(&records);
        assert_eq!(fourth, "4");
    }

    #[test]
    fn test_skips_ids_already_present() {
        let mut ids = IdAllocator::new(IdPolicy::Sequential, &[]);
        let records = vec![customer("1", "A", CustomerStatus::Active)];
        assert_eq!(ids.allocate(&records), "2");
    }

    #[test]
    fn test_uuid_policy() {
        let records = vec![customer("1", "A", CustomerStatus::Active)];
        let mut ids = IdAllocator::new(IdPolicy::Uuid, &records);
        let id = ids.allocate(&records);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, ids.allocate(&records));
    }
}
