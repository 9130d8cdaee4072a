//! # Customer Store
//!
//! The persistence boundary. The coordinator never mutates the record set
//! until a store call for that change has completed successfully.
//!
//! Only `SimulatedStore` ships today: it waits a fixed delay and succeeds,
//! standing in for a future network round trip.

mod simulated;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::model::Customer;

pub use simulated::SimulatedStore;

/// Errors a store operation can end with.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Backend refused or could not be reached.
    Unavailable(String),
    /// The call did not finish within the configured timeout.
    Timeout(Duration),
    /// No record with this id exists in the backend.
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
            StoreError::Timeout(after) => {
                write!(f, "store timed out after {}s", after.as_secs_f32())
            }
            StoreError::NotFound(id) => write!(f, "customer {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Returns the name of the store, for logs.
    fn name(&self) -> &str;

    async fn create(&self, customer: Customer) -> Result<Customer, StoreError>;

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// A mutation the coordinator wants persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    Create(Customer),
    Update(Customer),
    Delete(String),
}

impl StoreRequest {
    pub fn label(&self) -> &'static str {
        match self {
            StoreRequest::Create(_) => "create",
            StoreRequest::Update(_) => "update",
            StoreRequest::Delete(_) => "delete",
        }
    }
}

/// What a successful store call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Created(Customer),
    Updated(Customer),
    Deleted(String),
}

/// Run `request` against `store`, giving up after `timeout`.
pub async fn execute(
    store: &dyn CustomerStore,
    request: StoreRequest,
    timeout: Duration,
) -> Result<StoreOutcome, StoreError> {
    let call = async {
        match request {
            StoreRequest::Create(customer) => store.create(customer).await.map(StoreOutcome::Created),
            StoreRequest::Update(customer) => store.update(customer).await.map(StoreOutcome::Updated),
            StoreRequest::Delete(id) => {
                store.delete(&id).await?;
                Ok(StoreOutcome::Deleted(id))
            }
        }
    };
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}
