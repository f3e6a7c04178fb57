use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrarConfig {
    /// Remote drivers reachable over the HTTP binding.
    pub drivers: Vec<DriverConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfig {
    pub method: String,
    pub driver_url: String,
    #[serde(default = "default_include_method_param")]
    pub include_method_param: bool,
}

fn default_include_method_param() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot parse config: `{0}`")]
    Json(#[from] serde_json::Error),
    #[error("Invalid DID method name: `{0}`")]
    InvalidMethod(String),
    #[error("Invalid driver url for method `{method}`: {reason}")]
    InvalidDriverUrl { method: String, reason: String },
}

impl RegistrarConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        // A config must be an object, never a sequence.
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let config: Self = serde_json::from_value(Value::Object(map))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for driver in &self.drivers {
            if driver.method.is_empty()
                || !driver
                    .method
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return Err(ConfigError::InvalidMethod(driver.method.to_owned()));
            }

            reqwest::Url::parse(&driver.driver_url).map_err(|e| {
                ConfigError::InvalidDriverUrl {
                    method: driver.method.to_owned(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}
