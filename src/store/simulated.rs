use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::{CustomerStore, StoreError};
use crate::core::model::Customer;

/// Waits `delay`, then succeeds. `failing()` makes every call return the
/// given error instead, after the same delay.
pub struct SimulatedStore {
    delay: Duration,
    failure: Option<StoreError>,
}

impl SimulatedStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    pub fn failing(delay: Duration, error: StoreError) -> Self {
        Self {
            delay,
            failure: Some(error),
        }
    }

    async fn round_trip(&self, op: &str, id: &str) -> Result<(), StoreError> {
        debug!("SimulatedStore: {op} {id} (delay {:?})", self.delay);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CustomerStore for SimulatedStore {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn create(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.round_trip("create", &customer.id).await?;
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.round_trip("update", &customer.id).await?;
        Ok(customer)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.round_trip("delete", id).await
    }
}
