//! Extension pipeline.

use serde_json::{Map, Value};

use crate::{
    extension::{error::ExtensionProviderError, RegistrarContext},
    request::OperationKind,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ExtensionProvider: Send + Sync {
    /// Runs the before-read hooks of `operation` against the raw request map.
    fn run_before(
        &self,
        operation: OperationKind,
        method: &str,
        request: &mut Map<String, Value>,
        context: &RegistrarContext,
    ) -> Result<(), ExtensionProviderError>;

    /// Runs the before-write hooks of `operation` against the outgoing state map.
    fn run_after(
        &self,
        operation: OperationKind,
        method: &str,
        state: &mut Map<String, Value>,
        context: &RegistrarContext,
    ) -> Result<(), ExtensionProviderError>;
}
