use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common_models::macros::impl_string_newtype;

const DID_SCHEME: &str = "did:";

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DidValue(String);
impl_string_newtype!(DidValue);

impl DidValue {
    pub fn parse(&self) -> Result<Did, DidParseError> {
        self.as_str().parse()
    }
}

/// A syntactically valid DID, split into its method name and method-specific id.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Did {
    value: DidValue,
    method_len: usize,
}

impl Did {
    pub fn method_name(&self) -> &str {
        &self.value.as_str()[DID_SCHEME.len()..DID_SCHEME.len() + self.method_len]
    }

    pub fn method_specific_id(&self) -> &str {
        &self.value.as_str()[DID_SCHEME.len() + self.method_len + 1..]
    }

    pub fn value(&self) -> &DidValue {
        &self.value
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.value, f)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DidParseError {
    #[error("Missing `did:` prefix")]
    MissingScheme,
    #[error("Invalid method name: `{0}`")]
    InvalidMethodName(String),
    #[error("Missing method-specific id")]
    MissingMethodSpecificId,
    #[error("Invalid character `{0}` in method-specific id")]
    InvalidCharacter(char),
    #[error("Invalid percent-encoding in method-specific id")]
    InvalidPercentEncoding,
}

impl FromStr for Did {
    type Err = DidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let rest = value
            .strip_prefix(DID_SCHEME)
            .ok_or(DidParseError::MissingScheme)?;

        let (method, method_specific_id) = rest
            .split_once(':')
            .ok_or(DidParseError::MissingMethodSpecificId)?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(DidParseError::InvalidMethodName(method.to_owned()));
        }

        validate_method_specific_id(method_specific_id)?;

        Ok(Self {
            value: DidValue::from(value),
            method_len: method.len(),
        })
    }
}

fn validate_method_specific_id(id: &str) -> Result<(), DidParseError> {
    if id.is_empty() || id.ends_with(':') {
        return Err(DidParseError::MissingMethodSpecificId);
    }

    let mut chars = id.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let is_hex = |c: Option<char>| c.is_some_and(|c| c.is_ascii_hexdigit());
                if !is_hex(chars.next()) || !is_hex(chars.next()) {
                    return Err(DidParseError::InvalidPercentEncoding);
                }
            }
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':') => {}
            c => return Err(DidParseError::InvalidCharacter(c)),
        }
    }

    Ok(())
}
