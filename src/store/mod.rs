//! Store modules and composition
//!
//! [`CrudModule`] generates per-operation state and transitions from a list
//! of base operation names; [`ModuleRegistry`] collects modules; [`Store`]
//! composes them into one state tree and routes dispatched actions.
//!
//! There is no ambient global store: the composition root constructs exactly
//! one [`Store`] and passes it down explicitly.

pub mod crud;
pub mod registry;

pub use crud::{ActionFactory, CrudModule, CrudModuleBuilder, OperationState};
pub use registry::ModuleRegistry;

use crate::core::action::Action;
use crate::core::error::{StoreError, TrellisResult};
use crate::core::module::{HandlerMap, ModuleState};
use indexmap::IndexMap;
use serde_json::Value;

/// The composed application store
///
/// Owns one state slice per registered module. State is mutated only through
/// [`dispatch`](Self::dispatch); reads go through the accessors.
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
/// use serde_json::json;
///
/// let module = CrudModule::builder("user").items(["FETCH_USER"]).build().unwrap();
/// let pending = module.actions("fetchUser").unwrap().pending();
///
/// let mut registry = ModuleRegistry::new();
/// registry.register(module).unwrap();
/// let mut store = Store::from_registry(registry).unwrap();
///
/// store.dispatch(&pending);
/// assert_eq!(store.slice("user", "fetchUser").unwrap()["pending"], json!(true));
/// ```
#[derive(Debug)]
pub struct Store {
    state: IndexMap<String, ModuleState>,
    handlers: IndexMap<String, HandlerMap>,
}

impl Store {
    /// Compose a store from registered modules
    ///
    /// Composition fails fast when a module's handler targets a slice its
    /// initial state does not declare; dispatch never has to guess.
    pub fn from_registry(registry: ModuleRegistry) -> TrellisResult<Self> {
        let mut state = IndexMap::new();
        let mut handlers = IndexMap::new();
        for module in registry.into_modules() {
            let name = module.name().to_string();
            let initial = module.initial_state();
            let map = module.handlers();
            for (action_key, transition) in &map {
                if !initial.contains_key(&transition.slice) {
                    return Err(StoreError::UnknownSliceTarget {
                        module: name,
                        action: action_key.clone(),
                        slice: transition.slice.clone(),
                    }
                    .into());
                }
            }
            tracing::info!(module = %name, slices = initial.len(), "composed store module");
            state.insert(name.clone(), initial);
            handlers.insert(name, map);
        }
        Ok(Self { state, handlers })
    }

    /// Dispatch an action through every module's transition map
    ///
    /// The action routes to the handler (if any) whose key matches the
    /// camel-cased action type; modules without a matching handler keep
    /// their state unchanged. Malformed actions (empty type) are ignored.
    pub fn dispatch(&mut self, action: &Action) {
        if !action.is_well_formed() {
            tracing::debug!("ignoring action without a type");
            return;
        }
        let key = action.handler_key();
        for (module, map) in &self.handlers {
            let Some(transition) = map.get(&key) else {
                continue;
            };
            let Some(module_state) = self.state.get_mut(module) else {
                continue;
            };
            let current = module_state
                .get(&transition.slice)
                .cloned()
                .unwrap_or(Value::Null);
            let next = (transition.apply)(action, &current);
            module_state.insert(transition.slice.clone(), next);
            tracing::debug!(
                action = %action.kind,
                module = %module,
                slice = %transition.slice,
                "applied transition"
            );
        }
    }

    /// The whole state tree: module name → module state
    pub fn state(&self) -> &IndexMap<String, ModuleState> {
        &self.state
    }

    /// One module's state
    pub fn module_state(&self, module: &str) -> Option<&ModuleState> {
        self.state.get(module)
    }

    /// One slice of one module's state
    pub fn slice(&self, module: &str, key: &str) -> Option<&Value> {
        self.state.get(module).and_then(|state| state.get(key))
    }
}
