use std::sync::Arc;

use serde_json::{Map, Value};

use crate::driver::{error::DriverProviderError, provider::DriverProvider, Driver};

/// Immutable method-to-driver registry. When several drivers are registered
/// for one method, the first registration is selected.
pub struct DriverProviderImpl {
    drivers: Vec<(String, Arc<dyn Driver>)>,
}

impl DriverProviderImpl {
    pub fn new(drivers: Vec<(String, Arc<dyn Driver>)>) -> Self {
        Self { drivers }
    }
}

impl DriverProvider for DriverProviderImpl {
    fn get_driver(&self, method: &str) -> Result<Arc<dyn Driver>, DriverProviderError> {
        self.drivers
            .iter()
            .find(|(registered, _)| registered == method)
            .map(|(_, driver)| driver.clone())
            .ok_or_else(|| DriverProviderError::MissingDriver(method.to_owned()))
    }

    fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = vec![];
        for (method, _) in &self.drivers {
            if !methods.contains(method) {
                methods.push(method.to_owned());
            }
        }
        methods
    }

    fn properties(&self) -> Map<String, Value> {
        self.methods()
            .into_iter()
            .filter_map(|method| {
                let driver = self.get_driver(&method).ok()?;
                Some((method, Value::Object(driver.properties())))
            })
            .collect()
    }
}

#[cfg(test)]
mod test;
