use std::{
    collections::HashMap,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

use serde_json::{Map, Value};

use crate::{
    extension::{
        error::{ExtensionError, ExtensionProviderError},
        provider::ExtensionProvider,
        Extension, ExtensionHook, ExtensionStage, RegistrarContext,
    },
    request::OperationKind,
    util::panic_message,
};

/// Runs extensions sequentially, in registration order, per hook slot.
/// The first rejection stops the pipeline.
pub struct ExtensionProviderImpl {
    hooks: HashMap<ExtensionHook, Vec<Arc<dyn Extension>>>,
}

impl ExtensionProviderImpl {
    pub fn new(extensions: Vec<Arc<dyn Extension>>) -> Self {
        let mut hooks: HashMap<ExtensionHook, Vec<Arc<dyn Extension>>> = HashMap::new();

        for extension in extensions {
            let mut declared: Vec<ExtensionHook> = vec![];
            for hook in extension.hooks() {
                if !declared.contains(&hook) {
                    declared.push(hook);
                }
            }

            for hook in declared {
                hooks.entry(hook).or_default().push(extension.clone());
            }
        }

        Self { hooks }
    }

    fn run(
        &self,
        hook: ExtensionHook,
        method: &str,
        map: &mut Map<String, Value>,
        context: &RegistrarContext,
    ) -> Result<(), ExtensionProviderError> {
        let Some(extensions) = self.hooks.get(&hook) else {
            return Ok(());
        };

        for extension in extensions {
            let name = extension.name();
            tracing::debug!("Executing extension ({hook}) {name} for method {method}");

            let result = catch_unwind(AssertUnwindSafe(|| match hook.stage {
                ExtensionStage::BeforeRead => {
                    extension.before_read(hook.operation, method, map, context)
                }
                ExtensionStage::BeforeWrite => {
                    extension.before_write(hook.operation, method, map, context)
                }
            }))
            .unwrap_or_else(|payload| {
                Err(ExtensionError::Rejected(format!(
                    "Extension panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

            if let Err(ExtensionError::Rejected(reason)) = result {
                tracing::warn!("Extension ({hook}) {name} rejected {method} operation: {reason}");
                return Err(ExtensionProviderError::Rejected {
                    extension: name,
                    hook,
                    reason,
                });
            }
        }

        Ok(())
    }
}

impl ExtensionProvider for ExtensionProviderImpl {
    fn run_before(
        &self,
        operation: OperationKind,
        method: &str,
        request: &mut Map<String, Value>,
        context: &RegistrarContext,
    ) -> Result<(), ExtensionProviderError> {
        self.run(ExtensionHook::before_read(operation), method, request, context)
    }

    fn run_after(
        &self,
        operation: OperationKind,
        method: &str,
        state: &mut Map<String, Value>,
        context: &RegistrarContext,
    ) -> Result<(), ExtensionProviderError> {
        self.run(ExtensionHook::before_write(operation), method, state, context)
    }
}
