use one_registrar_providers::state::{ResultState, Status};
use strum_macros::{Display, EnumString};

use crate::service::error::RegistrarError;

/// Machine-readable code of a failure produced by the registrar itself.
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrarErrorCode {
    MissingMethod,
    MalformedIdentifier,
    UnsupportedMethod,
    ExtensionRejected,
    InvalidRequest,
    DriverFailure,
    NoStateProduced,
}

/// Coarse outcome class a transport binding maps onto its status codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Accepted,
    ClientError,
    ServerError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    /// The state to deliver to the caller.
    pub state: ResultState,
    /// Set when `state` is a failure raised by the registrar rather than reported by a driver.
    pub error: Option<RegistrarError>,
    /// The normalized state that a failing before-write extension prevented from being delivered.
    pub undelivered_state: Option<ResultState>,
}

impl OperationOutcome {
    pub fn response_class(&self) -> ResponseClass {
        match (&self.error, self.state.status) {
            (Some(error), _) if error.is_client_error() => ResponseClass::ClientError,
            (Some(_), _) | (None, Status::Failed) => ResponseClass::ServerError,
            (None, Status::Finished) => ResponseClass::Success,
            (None, Status::ActionRequired) => ResponseClass::Accepted,
        }
    }
}
