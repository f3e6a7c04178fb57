//! The **One Registrar Core** accepts DID create, update and deactivate
//! operations and routes each of them to the driver implementing the
//! targeted DID method.
//!
//! Callers do not need to know which backend implements which DID method.
//! The registrar resolves the method from an explicit hint or from the DID
//! itself, runs the registered extensions around the driver call and shapes
//! every outcome, success or failure, into a uniform result state.
//!
//! ## Repository structure
//!
//! * **Providers** (`one-registrar-providers`)
//!   * Request and result state models
//!   * Driver registry and the HTTP binding driver
//!   * Extension pipeline
//! * **Core**
//!   * Registrar service
//!
//! ## Getting started
//!
//! ```ignore rust
//! let registrar = OneRegistrar::new(None, vec![("example".to_string(), driver)], vec![])?;
//!
//! let outcome = registrar
//!     .registrar_service
//!     .create(None, request_map)
//!     .await;
//! ```
//!
//! See `demos/registration_example` for a runnable setup.

use std::sync::Arc;

use config::{ConfigError, RegistrarConfig};
use one_registrar_providers::{
    driver::{
        imp::{
            http::{HttpDriver, Params as HttpDriverParams},
            provider::DriverProviderImpl,
        },
        Driver,
    },
    extension::{imp::provider::ExtensionProviderImpl, Extension},
};
use service::registrar_service::RegistrarService;

pub mod config;
pub mod model;
pub mod service;

pub struct OneRegistrar {
    pub registrar_service: RegistrarService,
}

impl OneRegistrar {
    /// Assembles the driver registry and extension pipeline. In-process
    /// `drivers` are registered before the remote drivers of `config`, so
    /// they take precedence for a shared method.
    pub fn new(
        config: Option<RegistrarConfig>,
        drivers: Vec<(String, Arc<dyn Driver>)>,
        extensions: Vec<Arc<dyn Extension>>,
    ) -> Result<Self, ConfigError> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let client = reqwest::Client::new();
        let remote_drivers = config.drivers.into_iter().map(|driver| {
            (
                driver.method,
                Arc::new(HttpDriver::new(
                    HttpDriverParams {
                        driver_url: driver.driver_url,
                        include_method_param: driver.include_method_param,
                    },
                    client.clone(),
                )) as Arc<dyn Driver>,
            )
        });

        let driver_provider = Arc::new(DriverProviderImpl::new(
            drivers.into_iter().chain(remote_drivers).collect(),
        ));
        let extension_provider = Arc::new(ExtensionProviderImpl::new(extensions));

        Ok(Self {
            registrar_service: RegistrarService::new(driver_provider, extension_provider),
        })
    }
}
