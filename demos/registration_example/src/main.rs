use std::{collections::HashMap, error::Error, sync::Arc};

use async_trait::async_trait;
use one_registrar_core::{model::OperationOutcome, OneRegistrar};
use one_registrar_providers::{
    common_models::{did::DidValue, job::JobId},
    driver::{error::DriverError, Driver},
    extension::{error::ExtensionError, Extension, ExtensionHook, RegistrarContext},
    request::{OperationKind, OperationRequest},
    state::ResultState,
};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// In-process `did:example` driver. Creating a DID takes two steps: the
/// first call opens a job, the second one, carrying the job id and a seed,
/// completes it.
#[derive(Default)]
struct ExampleDriver {
    jobs: Mutex<HashMap<JobId, DidValue>>,
}

#[async_trait]
impl Driver for ExampleDriver {
    async fn create(
        &self,
        _method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        let mut jobs = self.jobs.lock().await;

        let Some(job_id) = &request.job_id else {
            let job_id = JobId::from(uuid::Uuid::new_v4().to_string());
            let did = DidValue::from(format!("did:example:{}", uuid::Uuid::new_v4().simple()));
            jobs.insert(job_id.clone(), did);

            let mut state = ResultState::action_required(job_id);
            state.did_registration_metadata = json!({ "action": "provide secret.seed" })
                .as_object()
                .cloned();
            return Ok(Some(state));
        };

        if request.secret.get("seed").is_none() {
            return Err(DriverError::InvalidRequest("Missing secret.seed".to_owned()));
        }

        let did = jobs
            .remove(job_id)
            .ok_or_else(|| DriverError::InvalidRequest(format!("Unknown job: {job_id}")))?;

        let mut state = ResultState::finished(did.clone());
        state.did_document = Some(json!({ "id": did }));
        Ok(Some(state))
    }

    async fn update(
        &self,
        _method: &str,
        _request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        Err(DriverError::NotSupported)
    }

    async fn deactivate(
        &self,
        _method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        Ok(request.did.clone().map(ResultState::finished))
    }

    fn properties(&self) -> Map<String, Value> {
        json!({ "network": "demo" })
            .as_object()
            .cloned()
            .unwrap_or_default()
    }
}

/// Refuses deactivation requests that carry no secret.
struct RequireDeactivationSecret;

impl Extension for RequireDeactivationSecret {
    fn name(&self) -> String {
        "require-deactivation-secret".to_owned()
    }

    fn hooks(&self) -> Vec<ExtensionHook> {
        vec![ExtensionHook::before_read(OperationKind::Deactivate)]
    }

    fn before_read(
        &self,
        _operation: OperationKind,
        _method: &str,
        request: &mut Map<String, Value>,
        _context: &RegistrarContext,
    ) -> Result<(), ExtensionError> {
        match request.get("secret").and_then(Value::as_object) {
            Some(secret) if !secret.is_empty() => Ok(()),
            _ => Err(ExtensionError::Rejected("Deactivation requires a secret".to_owned())),
        }
    }
}

fn print_outcome(step: &str, outcome: &OperationOutcome) -> Result<(), Box<dyn Error>> {
    let body = serde_json::to_string_pretty(&outcome.state)?;
    println!("{step} ({:?}):\n{body}\n", outcome.response_class());
    Ok(())
}

fn request(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or("info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registrar = OneRegistrar::new(
        None,
        vec![("example".to_owned(), Arc::new(ExampleDriver::default()) as _)],
        vec![Arc::new(RequireDeactivationSecret) as _],
    )?;
    let service = &registrar.registrar_service;

    tracing::info!("Registered methods: {:?}", service.methods());

    let started = service
        .create(Some("example"), request(json!({ "options": {} })))
        .await;
    print_outcome("Create, first step", &started)?;

    let job_id = started
        .state
        .job_id
        .ok_or("Driver did not open a job")?;
    let finished = service
        .create(
            Some("example"),
            request(json!({ "jobId": job_id.as_str(), "secret": { "seed": "demo-seed" } })),
        )
        .await;
    print_outcome("Create, second step", &finished)?;

    let did = finished.state.did.ok_or("Driver did not create a DID")?;

    let rejected = service
        .deactivate(None, request(json!({ "did": did.as_str() })))
        .await;
    print_outcome("Deactivate without secret", &rejected)?;

    let deactivated = service
        .deactivate(
            None,
            request(json!({ "did": did.as_str(), "secret": { "key": "demo-key" } })),
        )
        .await;
    print_outcome("Deactivate", &deactivated)?;

    let malformed = service
        .deactivate(None, request(json!({ "did": "not-a-did" })))
        .await;
    print_outcome("Deactivate malformed DID", &malformed)?;

    Ok(())
}
