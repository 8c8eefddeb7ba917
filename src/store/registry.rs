//! Module registry for assembling the application state tree
//!
//! Modules register here before the [`Store`](crate::store::Store) is built.
//! Registration order is preserved: it becomes the slice order of the
//! composed state tree.

use crate::core::error::{StoreError, TrellisResult};
use crate::core::module::StoreModule;

/// Registry for all store modules in the application
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Box<dyn StoreModule>>,
}

impl ModuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module
    ///
    /// Fails if a module with the same name is already registered.
    pub fn register(&mut self, module: impl StoreModule + 'static) -> TrellisResult<()> {
        if self.modules.iter().any(|m| m.name() == module.name()) {
            return Err(StoreError::DuplicateModule {
                module: module.name().to_string(),
            }
            .into());
        }
        tracing::debug!(module = %module.name(), "registered module");
        self.modules.push(Box::new(module));
        Ok(())
    }

    /// Names of all registered modules, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn into_modules(self) -> Vec<Box<dyn StoreModule>> {
        self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module::{HandlerMap, ModuleState};

    /// Minimal module for registry tests
    struct NamedModule(&'static str);

    impl StoreModule for NamedModule {
        fn name(&self) -> &str {
            self.0
        }

        fn initial_state(&self) -> ModuleState {
            ModuleState::new()
        }

        fn handlers(&self) -> HandlerMap {
            HandlerMap::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ModuleRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ModuleRegistry::new();
        registry.register(NamedModule("session")).unwrap();
        registry.register(NamedModule("user")).unwrap();
        assert_eq!(registry.names(), vec!["session", "user"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_module_name_rejected() {
        let mut registry = ModuleRegistry::new();
        registry.register(NamedModule("session")).unwrap();
        let err = registry.register(NamedModule("session")).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_MODULE");
    }
}
