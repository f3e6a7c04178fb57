//! Method-specific registration backends.
//!
//! A driver performs the actual ledger or cryptographic work of a DID method.
//! From the registrar's point of view it is stateless: continuation state for
//! multi-step jobs is the driver's own business, addressed by the opaque job
//! id it hands out. Concurrent resumption of the same job is not serialized
//! by the registrar, so drivers that cannot tolerate it must guard against it.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    driver::error::DriverError,
    request::{OperationKind, OperationRequest},
    state::ResultState,
};

pub mod error;
pub mod imp;
pub mod provider;

/// Performs registration operations for one or more DID methods.
///
/// `Ok(None)` means the driver finished without producing a state.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Driver: Send + Sync {
    /// Creates a DID.
    async fn create(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError>;

    /// Updates the DID document of an existing DID.
    async fn update(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError>;

    /// Deactivates a DID.
    async fn deactivate(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError>;

    /// Free-form description of the driver, e.g. supported networks.
    fn properties(&self) -> Map<String, Value>;
}

/// Calls the driver operation matching `operation`.
pub async fn invoke(
    driver: &dyn Driver,
    operation: OperationKind,
    method: &str,
    request: &OperationRequest,
) -> Result<Option<ResultState>, DriverError> {
    match operation {
        OperationKind::Create => driver.create(method, request).await,
        OperationKind::Update => driver.update(method, request).await,
        OperationKind::Deactivate => driver.deactivate(method, request).await,
    }
}
