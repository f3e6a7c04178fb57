//! Driver forwarding operations to a remote driver over the registrar HTTP binding.

use async_trait::async_trait;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    driver::{error::DriverError, Driver},
    request::{OperationKind, OperationRequest},
    state::ResultState,
};

#[derive(Debug, Clone)]
pub struct Params {
    pub driver_url: String,
    /// Whether to pass the resolved method as `?method=` query parameter.
    pub include_method_param: bool,
}

pub struct HttpDriver {
    pub params: Params,
    pub client: reqwest::Client,
}

impl HttpDriver {
    pub fn new(params: Params, client: reqwest::Client) -> Self {
        Self { params, client }
    }

    fn operation_url(&self, operation: OperationKind, method: &str) -> Result<Url, DriverError> {
        let base = self.params.driver_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/1.0/{operation}"))
            .map_err(|e| DriverError::Other(format!("Invalid driver url: {e}")))?;

        if self.params.include_method_param {
            url.query_pairs_mut().append_pair("method", method);
        }

        Ok(url)
    }

    async fn send(
        &self,
        operation: OperationKind,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        let url = self.operation_url(operation, method)?;
        let body = request_body(request)?;
        tracing::debug!("Sending {} request to driver at {url}", operation.label());

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DriverError::Remote(format!("Could not reach driver: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DriverError::Remote(format!("Could not read driver response: {e}")))?;

        if status.is_success() && body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice::<ResultState>(&body) {
            Ok(state) => Ok(Some(state)),
            Err(e) if status.is_success() => Err(DriverError::Remote(format!(
                "Could not deserialize driver state: {e}"
            ))),
            Err(_) => Err(DriverError::Remote(format!(
                "Driver responded with status {status}: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }
}

/// The HTTP binding carries the operation payload as `didDocument`.
fn request_body(request: &OperationRequest) -> Result<Value, DriverError> {
    let mut body = serde_json::to_value(request)
        .map_err(|e| DriverError::InvalidRequest(format!("Could not serialize request: {e}")))?;

    if let Some(fields) = body.as_object_mut() {
        if let Some(payload) = fields.remove("payload") {
            fields.insert("didDocument".to_owned(), payload);
        }
    }

    Ok(body)
}

#[async_trait]
impl Driver for HttpDriver {
    async fn create(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        self.send(OperationKind::Create, method, request).await
    }

    async fn update(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        self.send(OperationKind::Update, method, request).await
    }

    async fn deactivate(
        &self,
        method: &str,
        request: &OperationRequest,
    ) -> Result<Option<ResultState>, DriverError> {
        self.send(OperationKind::Deactivate, method, request).await
    }

    fn properties(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert(
            "driverUrl".to_owned(),
            Value::String(self.params.driver_url.to_owned()),
        );
        properties
    }
}
