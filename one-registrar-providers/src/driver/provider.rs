//! Driver registry.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::driver::{error::DriverProviderError, Driver};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DriverProvider: Send + Sync {
    fn get_driver(&self, method: &str) -> Result<Arc<dyn Driver>, DriverProviderError>;

    /// Registered method names, in registration order, without duplicates.
    fn methods(&self) -> Vec<String>;

    /// Properties of the driver selected for each registered method.
    fn properties(&self) -> Map<String, Value>;
}
