//! Enumerates errors related to drivers and the driver registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Not supported")]
    NotSupported,
    #[error("Invalid request: `{0}`")]
    InvalidRequest(String),
    #[error("Remote driver error: `{0}`")]
    Remote(String),
    #[error("Other: `{0}`")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum DriverProviderError {
    #[error("Missing driver for method: `{0}`")]
    MissingDriver(String),
}
