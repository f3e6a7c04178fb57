use one_registrar_providers::{
    extension::ExtensionStage, request::OperationKind, state::ResultState,
};
use thiserror::Error;

use crate::model::RegistrarErrorCode;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrarError {
    #[error("Missing DID method in request")]
    MissingMethod,
    #[error("Cannot parse DID `{did}`: {reason}")]
    MalformedIdentifier { did: String, reason: String },
    #[error("Unsupported DID method: `{0}`")]
    UnsupportedMethod(String),
    #[error(
        "Cannot process {} request at {stage}{}: {reason}",
        .operation.label(),
        .extension.as_ref().map(|name| format!(" by extension `{name}`")).unwrap_or_default()
    )]
    ExtensionRejected {
        operation: OperationKind,
        stage: ExtensionStage,
        /// Absent when the state left by the extensions could not be delivered.
        extension: Option<String>,
        reason: String,
    },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    DriverFailure(String),
    #[error("No state produced by driver")]
    NoStateProduced,
}

impl RegistrarError {
    pub fn code(&self) -> RegistrarErrorCode {
        match self {
            Self::MissingMethod => RegistrarErrorCode::MissingMethod,
            Self::MalformedIdentifier { .. } => RegistrarErrorCode::MalformedIdentifier,
            Self::UnsupportedMethod(_) => RegistrarErrorCode::UnsupportedMethod,
            Self::ExtensionRejected { .. } => RegistrarErrorCode::ExtensionRejected,
            Self::InvalidRequest(_) => RegistrarErrorCode::InvalidRequest,
            Self::DriverFailure(_) => RegistrarErrorCode::DriverFailure,
            Self::NoStateProduced => RegistrarErrorCode::NoStateProduced,
        }
    }

    /// Failures caused by what the client sent, as opposed to the registrar or its drivers.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::MissingMethod
            | Self::MalformedIdentifier { .. }
            | Self::UnsupportedMethod(_)
            | Self::InvalidRequest(_) => true,
            Self::ExtensionRejected { stage, .. } => *stage == ExtensionStage::BeforeRead,
            Self::DriverFailure(_) | Self::NoStateProduced => false,
        }
    }

    pub fn to_failed_state(&self) -> ResultState {
        ResultState::failed(self.code().to_string(), self.to_string())
    }
}
