//! # Domain Records
//!
//! Customers, deals, and activities as loaded from the record source.
//! Only customers are mutable; deals and activities are read-only context
//! shown in the details view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Prospect,
}

impl CustomerStatus {
    /// Cycles through statuses in form order (wraps around)
    pub fn next(self) -> CustomerStatus {
        match self {
            CustomerStatus::Active => CustomerStatus::Prospect,
            CustomerStatus::Prospect => CustomerStatus::Inactive,
            CustomerStatus::Inactive => CustomerStatus::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Inactive => "Inactive",
            CustomerStatus::Prospect => "Prospect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: CustomerStatus,
    /// Lifetime value in whole dollars. Never negative.
    pub value: f64,
    pub created_at: NaiveDate,
    pub last_contact: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Customer {
    /// Initials for the avatar placeholder ("John Smith" → "JS").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DealStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    pub fn is_closed(self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }

    pub fn label(self) -> &'static str {
        match self {
            DealStage::Prospecting => "Prospecting",
            DealStage::Qualification => "Qualification",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Closed Won",
            DealStage::ClosedLost => "Closed Lost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    /// Win probability, 0–100.
    pub probability: u8,
    pub customer_id: String,
    pub expected_close_date: NaiveDate,
    pub created_at: NaiveDate,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Note,
    DealCreated,
    DealWon,
    DealLost,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Call => "call",
            ActivityKind::Email => "email",
            ActivityKind::Meeting => "meeting",
            ActivityKind::Note => "note",
            ActivityKind::DealCreated => "deal created",
            ActivityKind::DealWon => "deal won",
            ActivityKind::DealLost => "deal lost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub deal_id: Option<String>,
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_deserializes_camel_case() {
        let json = r#"{
            "id": "1",
            "name": "John Smith",
            "email": "john@techcorp.com",
            "phone": "+1 (555) 123-4567",
            "company": "TechCorp",
            "status": "active",
            "value": 125000,
            "createdAt": "2024-01-15",
            "lastContact": "2024-01-20"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.status, CustomerStatus::Active);
        assert_eq!(customer.value, 125000.0);
        assert_eq!(customer.created_at, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(customer.avatar.is_none());
    }

    #[test]
    fn test_deal_stage_kebab_case() {
        let stage: DealStage = serde_json::from_str("\"closed-won\"").unwrap();
        assert_eq!(stage, DealStage::ClosedWon);
        assert!(stage.is_closed());
        assert!(!DealStage::Proposal.is_closed());
    }

    #[test]
    fn test_activity_type_field() {
        let json = r#"{
            "id": "1",
            "type": "deal-won",
            "title": "Closed",
            "description": "Closed for $180,000",
            "customerId": "5",
            "assignedTo": "Alex",
            "createdAt": "2024-01-21T10:30:00Z"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.kind, ActivityKind::DealWon);
        assert_eq!(activity.customer_id.as_deref(), Some("5"));
        assert!(activity.deal_id.is_none());
    }

    #[test]
    fn test_initials() {
        let json = r#"{"id":"1","name":"Mary Ann Lee","email":"m@x.io","phone":"5551234567",
            "company":"X","status":"prospect","value":0,"createdAt":"2024-01-01","lastContact":"2024-01-01"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.initials(), "MAL");
    }

    #[test]
    fn test_status_cycle_wraps() {
        let mut status = CustomerStatus::Active;
        for _ in 0..3 {
            status = status.next();
        }
        assert_eq!(status, CustomerStatus::Active);
    }
}
