//! Normalized representation of a client's create, update or deactivate intent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::common_models::{did::DidValue, job::JobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
    Deactivate,
}

impl OperationKind {
    /// Upper-case label used in log lines and failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Deactivate => "DEACTIVATE",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Target DID; required for update and deactivate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<DidValue>,
    #[serde(default, alias = "didDocument", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub options: Map<String, Value>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Secret::is_empty"
    )]
    pub secret: Secret,
}

impl OperationRequest {
    /// Parses the raw request map, after before-read extensions had their chance to mutate it.
    pub fn from_map(
        operation: OperationKind,
        map: Map<String, Value>,
    ) -> Result<Self, RequestError> {
        let request: Self = serde_json::from_value(Value::Object(map))?;

        if operation != OperationKind::Create && request.did.is_none() {
            return Err(RequestError::MissingDid(operation));
        }

        Ok(request)
    }
}

/// Sensitive material such as keys or passphrases. `Debug` never prints the values.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(Map<String, Value>);

impl Secret {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn expose(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([redacted]; {} entries)", self.0.len())
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Cannot parse request: `{0}`")]
    Json(#[from] serde_json::Error),
    #[error("Missing DID in {} request", .0.label())]
    MissingDid(OperationKind),
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
