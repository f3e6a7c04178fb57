//! A service dispatching create, update and deactivate requests to the
//! driver registered for their DID method.
//!
//! Every request goes through the same stages: method resolution, the
//! before-read extensions, parsing, exactly one driver invocation,
//! normalization of whatever the driver produced, and the before-write
//! extensions. Failures before the driver is called are rejections: no
//! driver or before-write extension runs. Later failures are translated into
//! a failed state, so every path ends with a well-formed state.

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use one_registrar_providers::{
    common_models::job::JobId,
    driver::{self, error::DriverError, provider::DriverProvider},
    extension::{
        error::ExtensionProviderError, provider::ExtensionProvider, ExtensionStage,
        RegistrarContext,
    },
    request::{OperationKind, OperationRequest},
    state::ResultState,
    util::panic_message,
};
use serde_json::{Map, Value};

use crate::{model::OperationOutcome, service::error::RegistrarError, service::method_resolver};

pub struct RegistrarService {
    driver_provider: Arc<dyn DriverProvider>,
    extension_provider: Arc<dyn ExtensionProvider>,
    context: RegistrarContext,
}

impl RegistrarService {
    pub fn new(
        driver_provider: Arc<dyn DriverProvider>,
        extension_provider: Arc<dyn ExtensionProvider>,
    ) -> Self {
        Self {
            context: RegistrarContext::new(driver_provider.clone()),
            driver_provider,
            extension_provider,
        }
    }

    pub async fn create(
        &self,
        method_hint: Option<&str>,
        request: Map<String, Value>,
    ) -> OperationOutcome {
        self.execute(OperationKind::Create, method_hint, request).await
    }

    pub async fn update(
        &self,
        method_hint: Option<&str>,
        request: Map<String, Value>,
    ) -> OperationOutcome {
        self.execute(OperationKind::Update, method_hint, request).await
    }

    pub async fn deactivate(
        &self,
        method_hint: Option<&str>,
        request: Map<String, Value>,
    ) -> OperationOutcome {
        self.execute(OperationKind::Deactivate, method_hint, request).await
    }

    /// Registered DID methods.
    pub fn methods(&self) -> Vec<String> {
        self.driver_provider.methods()
    }

    /// Driver properties per registered DID method.
    pub fn properties(&self) -> Map<String, Value> {
        self.driver_provider.properties()
    }

    pub async fn execute(
        &self,
        operation: OperationKind,
        method_hint: Option<&str>,
        mut request: Map<String, Value>,
    ) -> OperationOutcome {
        let job_id = request
            .get("jobId")
            .and_then(Value::as_str)
            .map(JobId::from);

        let (method, request) = match self.admit(operation, method_hint, &mut request) {
            Ok(admitted) => admitted,
            Err(error) => {
                tracing::warn!("Rejected {} request: {error}", operation.label());
                return OperationOutcome {
                    state: error.to_failed_state().normalized(job_id.as_ref()),
                    error: Some(error),
                    undelivered_state: None,
                };
            }
        };

        let (state, error) = match self.invoke(operation, &method, &request).await {
            Ok(state) => (state.normalized(request.job_id.as_ref()), None),
            Err(error) => {
                tracing::warn!("{} problem for {request:?}: {error}", operation.label());
                (
                    error.to_failed_state().normalized(request.job_id.as_ref()),
                    Some(error),
                )
            }
        };

        tracing::info!("{} state for {request:?}: {state:?}", operation.label());

        self.deliver(operation, &method, state, error)
    }

    /// Resolves the method, runs the before-read extensions and parses the request.
    fn admit(
        &self,
        operation: OperationKind,
        method_hint: Option<&str>,
        request: &mut Map<String, Value>,
    ) -> Result<(String, OperationRequest), RegistrarError> {
        let method = method_resolver::resolve_method(method_hint, request)?;
        tracing::info!("Incoming {} request for method {method}", operation.label());

        self.extension_provider
            .run_before(operation, &method, request, &self.context)
            .map_err(|ExtensionProviderError::Rejected { extension, reason, .. }| {
                RegistrarError::ExtensionRejected {
                    operation,
                    stage: ExtensionStage::BeforeRead,
                    extension: Some(extension),
                    reason,
                }
            })?;

        let mut parsed = OperationRequest::from_map(operation, std::mem::take(request))
            .map_err(|e| RegistrarError::InvalidRequest(e.to_string()))?;
        parsed.method = Some(method.to_owned());

        tracing::info!(
            "Parsed {} request for method {method}: {parsed:?}",
            operation.label()
        );

        Ok((method, parsed))
    }

    async fn invoke(
        &self,
        operation: OperationKind,
        method: &str,
        request: &OperationRequest,
    ) -> Result<ResultState, RegistrarError> {
        let driver = self
            .driver_provider
            .get_driver(method)
            .map_err(|_| RegistrarError::UnsupportedMethod(method.to_owned()))?;

        let result = AssertUnwindSafe(driver::invoke(driver.as_ref(), operation, method, request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(DriverError::Other(format!(
                    "Driver panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        match result {
            Ok(Some(state)) => Ok(state),
            Ok(None) => Err(RegistrarError::NoStateProduced),
            Err(e) => Err(RegistrarError::DriverFailure(format!(
                "{} problem for method {method}: {e}",
                operation.label()
            ))),
        }
    }

    /// Runs the before-write extensions against the state map. A failing
    /// extension replaces the state with a failure and keeps the original
    /// aside in the outcome.
    fn deliver(
        &self,
        operation: OperationKind,
        method: &str,
        state: ResultState,
        error: Option<RegistrarError>,
    ) -> OperationOutcome {
        let delivered = state
            .clone()
            .into_map()
            .map_err(|e| (None, format!("Cannot convert state: {e}")))
            .and_then(|mut state_map| {
                self.extension_provider
                    .run_after(operation, method, &mut state_map, &self.context)
                    .map_err(|ExtensionProviderError::Rejected { extension, reason, .. }| {
                        (Some(extension), reason)
                    })?;

                ResultState::from_map(state_map)
                    .map_err(|e| (None, format!("Extensions produced a malformed state: {e}")))
            });

        match delivered {
            Ok(delivered) => {
                let state = delivered.normalized(None);
                // Extensions may have recovered or replaced the failure.
                let error = error.filter(|error| {
                    state
                        .error
                        .as_ref()
                        .is_some_and(|state_error| state_error.code == error.code().to_string())
                });

                OperationOutcome {
                    state,
                    error,
                    undelivered_state: None,
                }
            }
            Err((extension, reason)) => {
                let error = RegistrarError::ExtensionRejected {
                    operation,
                    stage: ExtensionStage::BeforeWrite,
                    extension,
                    reason,
                };
                tracing::warn!("Cannot write {} state: {error}", operation.label());

                OperationOutcome {
                    state: error.to_failed_state().normalized(state.job_id.as_ref()),
                    error: Some(error),
                    undelivered_state: Some(state),
                }
            }
        }
    }
}
