//! Normalized outcome of a registration operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

use crate::common_models::{did::DidValue, job::JobId};

/// Error code of a failed state whose driver did not say why it failed.
pub const DEFAULT_FAILURE_CODE: &str = "DriverFailure";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Finished,
    Failed,
    ActionRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<DidValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_document: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_registration_metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_document_metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorState>,
    /// Fields outside the state model, e.g. added by drivers or before-write extensions.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultState {
    fn with_status(status: Status) -> Self {
        Self {
            job_id: None,
            status,
            did: None,
            did_document: None,
            did_registration_metadata: None,
            did_document_metadata: None,
            error: None,
            extra: Map::new(),
        }
    }

    pub fn finished(did: DidValue) -> Self {
        Self {
            did: Some(did),
            ..Self::with_status(Status::Finished)
        }
    }

    pub fn action_required(job_id: JobId) -> Self {
        Self {
            job_id: Some(job_id),
            ..Self::with_status(Status::ActionRequired)
        }
    }

    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorState {
                code: code.into(),
                message: message.into(),
            }),
            ..Self::with_status(Status::Failed)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    /// Parses an outgoing result map, e.g. after before-write extensions mutated it.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(map))
    }

    pub fn into_map(self) -> Result<Map<String, Value>, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    /// Enforces the state invariants on whatever a driver produced.
    ///
    /// A state carrying an error, or marked failed, keeps its job id and
    /// registration metadata but loses every success field. A state without
    /// a job id inherits the one the request continued. Asking for an action
    /// without any job id to resume with is itself a failure.
    pub fn normalized(mut self, request_job_id: Option<&JobId>) -> Self {
        if self.job_id.is_none() {
            self.job_id = request_job_id.cloned();
        }

        if self.status == Status::ActionRequired && self.job_id.is_none() {
            self.status = Status::Failed;
            self.error = Some(ErrorState {
                code: DEFAULT_FAILURE_CODE.to_owned(),
                message: "Driver requested an action without a job id".to_owned(),
            });
        }

        if self.error.is_some() || self.status == Status::Failed {
            self.status = Status::Failed;
            self.did = None;
            self.did_document = None;
            self.did_document_metadata = None;
            self.error.get_or_insert_with(|| ErrorState {
                code: DEFAULT_FAILURE_CODE.to_owned(),
                message: "Driver reported a failure without an error".to_owned(),
            });
        }

        self
    }
}

#[cfg(test)]
mod test;
