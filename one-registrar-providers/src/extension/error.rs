use thiserror::Error;

use crate::extension::ExtensionHook;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionProviderError {
    #[error("Extension `{extension}` ({hook}) rejected: {reason}")]
    Rejected {
        extension: String,
        hook: ExtensionHook,
        reason: String,
    },
}
