//! Determines the DID method a request targets.

use one_registrar_providers::common_models::did::Did;
use serde_json::{Map, Value};

use crate::service::error::RegistrarError;

/// Resolves the method from, in order: the out-of-band `method_hint`, the
/// request's own `method` field, and the method segment of its `did` field.
///
/// The DID is only parsed when neither of the explicit sources is present.
pub fn resolve_method(
    method_hint: Option<&str>,
    request: &Map<String, Value>,
) -> Result<String, RegistrarError> {
    let explicit = method_hint
        .filter(|method| !method.is_empty())
        .or_else(|| {
            request
                .get("method")
                .and_then(Value::as_str)
                .filter(|method| !method.is_empty())
        });

    if let Some(method) = explicit {
        return Ok(method.to_owned());
    }

    let did = request
        .get("did")
        .and_then(Value::as_str)
        .ok_or(RegistrarError::MissingMethod)?;

    tracing::debug!("Resolving method from DID {did}");

    did.parse::<Did>()
        .map(|did| did.method_name().to_owned())
        .map_err(|e| RegistrarError::MalformedIdentifier {
            did: did.to_owned(),
            reason: e.to_string(),
        })
}
