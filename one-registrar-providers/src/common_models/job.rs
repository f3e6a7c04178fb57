use serde::{Deserialize, Serialize};

use crate::common_models::macros::impl_string_newtype;

/// Opaque token addressing a multi-step job. Only drivers interpret it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct JobId(String);
impl_string_newtype!(JobId);
