//! Hooks invoked around driver dispatch.
//!
//! An extension declares the hook slots it fills through [`Extension::hooks`];
//! only those slots are ever invoked. Before-read hooks see the raw request
//! map before it is parsed, before-write hooks see the outgoing state map.
//! Either kind may mutate the map or abort processing by returning an error.

use std::sync::Arc;

use serde_json::{Map, Value};
use strum::Display;

use crate::{
    driver::{error::DriverProviderError, provider::DriverProvider, Driver},
    extension::error::ExtensionError,
    request::OperationKind,
};

pub mod error;
pub mod imp;
pub mod provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum ExtensionStage {
    BeforeRead,
    BeforeWrite,
}

/// One hook slot: a stage of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionHook {
    pub stage: ExtensionStage,
    pub operation: OperationKind,
}

impl ExtensionHook {
    pub fn before_read(operation: OperationKind) -> Self {
        Self {
            stage: ExtensionStage::BeforeRead,
            operation,
        }
    }

    pub fn before_write(operation: OperationKind) -> Self {
        Self {
            stage: ExtensionStage::BeforeWrite,
            operation,
        }
    }

    /// All six slots.
    pub fn all() -> Vec<Self> {
        [
            OperationKind::Create,
            OperationKind::Update,
            OperationKind::Deactivate,
        ]
        .into_iter()
        .flat_map(|operation| [Self::before_read(operation), Self::before_write(operation)])
        .collect()
    }
}

impl std::fmt::Display for ExtensionHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operation = match self.operation {
            OperationKind::Create => "Create",
            OperationKind::Update => "Update",
            OperationKind::Deactivate => "Deactivate",
        };
        write!(f, "{}{operation}", self.stage)
    }
}

/// Read-only view of the registrar handed to every hook.
#[derive(Clone)]
pub struct RegistrarContext {
    driver_provider: Arc<dyn DriverProvider>,
}

impl RegistrarContext {
    pub fn new(driver_provider: Arc<dyn DriverProvider>) -> Self {
        Self { driver_provider }
    }

    pub fn methods(&self) -> Vec<String> {
        self.driver_provider.methods()
    }

    pub fn get_driver(&self, method: &str) -> Result<Arc<dyn Driver>, DriverProviderError> {
        self.driver_provider.get_driver(method)
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Extension: Send + Sync {
    /// Name used in logs and failure reports.
    fn name(&self) -> String;

    /// The hook slots this extension fills.
    fn hooks(&self) -> Vec<ExtensionHook>;

    fn before_read(
        &self,
        _operation: OperationKind,
        _method: &str,
        _request: &mut Map<String, Value>,
        _context: &RegistrarContext,
    ) -> Result<(), ExtensionError> {
        Ok(())
    }

    fn before_write(
        &self,
        _operation: OperationKind,
        _method: &str,
        _state: &mut Map<String, Value>,
        _context: &RegistrarContext,
    ) -> Result<(), ExtensionError> {
        Ok(())
    }
}
