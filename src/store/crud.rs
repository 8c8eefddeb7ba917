//! Declarative CRUD store modules
//!
//! A [`CrudModule`] is synthesized from a list of base operation names. For
//! every operation `FETCH_USER` it derives:
//!
//! - four action-type constants: `FETCH_USER_PENDING`, `FETCH_USER_SUCCESS`,
//!   `FETCH_USER_ERROR`, `FETCH_USER_RESET`;
//! - an [`ActionFactory`] with `pending`/`success`/`error`/`reset` creators,
//!   looked up by operation key (`fetchUser`) rather than by synthesized
//!   member name;
//! - an initial state slice `{pending: false, data: null, error: null}`
//!   under the camel-cased key;
//! - four transitions in the module's handler map, keyed by camel-cased
//!   action type (`fetchUserPending`, ...).
//!
//! Custom state fields, constants and handlers merge alongside the generated
//! ones; any key collision fails construction instead of silently winning.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//! use serde_json::json;
//!
//! let module = CrudModule::builder("user")
//!     .items(["FETCH_USER", "UPDATE_USER"])
//!     .build()
//!     .unwrap();
//!
//! let fetch = module.actions("fetchUser").unwrap();
//! let action = fetch.success(json!({"id": 7}));
//! assert_eq!(action.kind, "FETCH_USER_SUCCESS");
//! ```

use crate::core::action::Action;
use crate::core::case::{camel_case, constant_case};
use crate::core::error::{StoreError, TrellisResult};
use crate::core::module::{HandlerMap, ModuleState, SliceTransition, StoreModule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Typed view of a generated state slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationState {
    pub pending: bool,
    pub data: Value,
    pub error: Value,
}

impl OperationState {
    /// The initial slice value every operation starts from
    pub fn initial_value() -> Value {
        json!({ "pending": false, "data": null, "error": null })
    }
}

/// Action creators for one operation
///
/// Creators are pure: they build an [`Action`] and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionFactory {
    base: String,
}

impl ActionFactory {
    fn new(base: String) -> Self {
        Self { base }
    }

    /// The normalized base operation name, e.g. `"FETCH_USER"`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Action type for the pending phase
    pub fn pending_type(&self) -> String {
        format!("{}_PENDING", self.base)
    }

    /// Action type for the success phase
    pub fn success_type(&self) -> String {
        format!("{}_SUCCESS", self.base)
    }

    /// Action type for the error phase
    pub fn error_type(&self) -> String {
        format!("{}_ERROR", self.base)
    }

    /// Action type for the reset phase
    pub fn reset_type(&self) -> String {
        format!("{}_RESET", self.base)
    }

    fn constant_names(&self) -> [String; 4] {
        [
            self.pending_type(),
            self.success_type(),
            self.error_type(),
            self.reset_type(),
        ]
    }

    /// The operation started
    pub fn pending(&self) -> Action {
        Action::bare(self.pending_type())
    }

    /// The operation finished with a result
    pub fn success(&self, data: Value) -> Action {
        Action::new(self.success_type(), data)
    }

    /// The operation failed
    pub fn error(&self, error: Value) -> Action {
        Action::new(self.error_type(), error)
    }

    /// Return the slice to its initial value
    pub fn reset(&self) -> Action {
        Action::bare(self.reset_type())
    }
}

/// Builder for [`CrudModule`]
///
/// All configuration mistakes (no items, duplicate operations, key
/// collisions) surface from [`build`](Self::build), never later.
#[derive(Debug, Default)]
pub struct CrudModuleBuilder {
    name: String,
    items: Vec<String>,
    state: IndexMap<String, Value>,
    constants: IndexMap<String, String>,
    handlers: Vec<(String, SliceTransition)>,
}

impl CrudModuleBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare the base operation names
    pub fn items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Declare a single base operation name
    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add a custom initial-state field alongside the generated slices
    pub fn state(mut self, key: impl Into<String>, value: Value) -> Self {
        self.state.insert(key.into(), value);
        self
    }

    /// Add a custom action-type constant alongside the generated ones
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    /// Register a custom transition
    ///
    /// `action_key` is the camel-cased action type; `slice` names the state
    /// field the transition rewrites. A custom handler registered for a
    /// generated key replaces the generated transition.
    pub fn handler(
        mut self,
        action_key: impl Into<String>,
        slice: impl Into<String>,
        apply: impl Fn(&Action, &Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.handlers
            .push((action_key.into(), SliceTransition::new(slice, apply)));
        self
    }

    /// Validate the configuration and build the module
    pub fn build(self) -> TrellisResult<CrudModule> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::MissingModuleName.into());
        }
        if self.items.is_empty() {
            return Err(StoreError::NoOperations { module: name }.into());
        }

        let mut ops: IndexMap<String, ActionFactory> = IndexMap::new();
        for raw in &self.items {
            let base = constant_case(raw.trim());
            if base.is_empty() {
                return Err(StoreError::InvalidOperation {
                    module: name,
                    item: raw.clone(),
                }
                .into());
            }
            let key = camel_case(&base);
            if ops.contains_key(&key) {
                return Err(StoreError::DuplicateOperation {
                    module: name,
                    item: base,
                }
                .into());
            }
            ops.insert(key, ActionFactory::new(base));
        }

        let mut constants: IndexMap<String, String> = IndexMap::new();
        for factory in ops.values() {
            for constant in factory.constant_names() {
                constants.insert(constant.clone(), constant);
            }
        }
        for (key, value) in self.constants {
            if constants.contains_key(&key) {
                return Err(StoreError::ConstantCollision {
                    module: name,
                    constant: key,
                }
                .into());
            }
            constants.insert(key, value);
        }

        let mut state: ModuleState = IndexMap::new();
        for key in ops.keys() {
            state.insert(key.clone(), OperationState::initial_value());
        }
        for (key, value) in self.state {
            if state.contains_key(&key) {
                return Err(StoreError::StateKeyCollision { module: name, key }.into());
            }
            state.insert(key, value);
        }

        tracing::debug!(
            module = %name,
            operations = ops.len(),
            "built crud store module"
        );

        Ok(CrudModule {
            name,
            ops,
            constants,
            state,
            custom_handlers: self.handlers,
        })
    }
}

/// A store module with generated CRUD state
#[derive(Debug)]
pub struct CrudModule {
    name: String,
    ops: IndexMap<String, ActionFactory>,
    constants: IndexMap<String, String>,
    state: ModuleState,
    custom_handlers: Vec<(String, SliceTransition)>,
}

impl CrudModule {
    /// Start building a module
    pub fn builder(name: impl Into<String>) -> CrudModuleBuilder {
        CrudModuleBuilder::new(name)
    }

    /// Look up the action creators for an operation
    ///
    /// Accepts the operation in any case (`"fetchUser"`, `"FETCH_USER"`);
    /// the lookup normalizes before matching.
    pub fn actions(&self, operation: &str) -> Option<&ActionFactory> {
        let key = camel_case(&constant_case(operation));
        self.ops.get(&key)
    }

    /// Operation keys in declaration order
    pub fn operation_keys(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// The merged constants map (generated first, then custom)
    pub fn constants(&self) -> &IndexMap<String, String> {
        &self.constants
    }

    /// Look up one action-type constant by name
    pub fn constant(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(String::as_str)
    }
}

impl StoreModule for CrudModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> ModuleState {
        self.state.clone()
    }

    fn handlers(&self) -> HandlerMap {
        let mut map = HandlerMap::new();
        for (key, factory) in &self.ops {
            map.insert(
                camel_case(&factory.pending_type()),
                SliceTransition::new(key.clone(), |_action, slice| pending_transition(slice)),
            );
            map.insert(
                camel_case(&factory.success_type()),
                SliceTransition::new(key.clone(), |action, slice| {
                    success_transition(slice, &action.data)
                }),
            );
            map.insert(
                camel_case(&factory.error_type()),
                SliceTransition::new(key.clone(), |action, slice| {
                    error_transition(slice, &action.data)
                }),
            );
            let initial = OperationState::initial_value();
            map.insert(
                camel_case(&factory.reset_type()),
                SliceTransition::new(key.clone(), move |_action, _slice| initial.clone()),
            );
        }
        // Custom transitions land last so they win on key conflicts
        for (action_key, transition) in &self.custom_handlers {
            map.insert(action_key.clone(), transition.clone());
        }
        map
    }
}

fn slice_object(slice: &Value) -> Map<String, Value> {
    if let Value::Object(map) = slice {
        return map.clone();
    }
    // Non-object slice: rebuild the default shape rather than panic
    let mut map = Map::new();
    map.insert("pending".to_string(), Value::Bool(false));
    map.insert("data".to_string(), Value::Null);
    map.insert("error".to_string(), Value::Null);
    map
}

fn pending_transition(slice: &Value) -> Value {
    let mut map = slice_object(slice);
    map.insert("pending".to_string(), Value::Bool(true));
    map.insert("error".to_string(), Value::Null);
    Value::Object(map)
}

fn success_transition(slice: &Value, data: &Value) -> Value {
    let mut map = slice_object(slice);
    map.insert("pending".to_string(), Value::Bool(false));
    map.insert("data".to_string(), data.clone());
    map.insert("error".to_string(), Value::Null);
    Value::Object(map)
}

fn error_transition(slice: &Value, error: &Value) -> Value {
    let mut map = slice_object(slice);
    map.insert("pending".to_string(), Value::Bool(false));
    map.insert("error".to_string(), error.clone());
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_module() -> CrudModule {
        CrudModule::builder("user")
            .items(["FETCH_X"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_generates_four_constants_per_item() {
        let module = fetch_module();
        for constant in [
            "FETCH_X_PENDING",
            "FETCH_X_SUCCESS",
            "FETCH_X_ERROR",
            "FETCH_X_RESET",
        ] {
            assert_eq!(module.constant(constant), Some(constant));
        }
    }

    #[test]
    fn test_generates_initial_slice_under_camel_key() {
        let module = fetch_module();
        let state = module.initial_state();
        assert_eq!(
            state.get("fetchX"),
            Some(&json!({"pending": false, "data": null, "error": null}))
        );
    }

    #[test]
    fn test_action_factory_types() {
        let module = fetch_module();
        let factory = module.actions("fetchX").unwrap();
        assert_eq!(factory.pending().kind, "FETCH_X_PENDING");
        assert_eq!(factory.success(json!(1)).kind, "FETCH_X_SUCCESS");
        assert_eq!(factory.error(json!("boom")).kind, "FETCH_X_ERROR");
        assert_eq!(factory.reset().kind, "FETCH_X_RESET");
    }

    #[test]
    fn test_actions_lookup_normalizes_case() {
        let module = fetch_module();
        assert!(module.actions("FETCH_X").is_some());
        assert!(module.actions("fetchX").is_some());
        assert!(module.actions("other").is_none());
    }

    #[test]
    fn test_items_normalize_to_constant_case() {
        let module = CrudModule::builder("user")
            .items(["fetchProfile"])
            .build()
            .unwrap();
        assert!(module.constant("FETCH_PROFILE_PENDING").is_some());
        assert!(module.initial_state().contains_key("fetchProfile"));
    }

    #[test]
    fn test_pending_transition_sets_flag_and_clears_error() {
        let slice = json!({"pending": false, "data": null, "error": "old"});
        let next = pending_transition(&slice);
        assert_eq!(next, json!({"pending": true, "data": null, "error": null}));
    }

    #[test]
    fn test_success_transition_stores_data() {
        let slice = json!({"pending": true, "data": null, "error": null});
        let next = success_transition(&slice, &json!({"foo": 1}));
        assert_eq!(
            next,
            json!({"pending": false, "data": {"foo": 1}, "error": null})
        );
    }

    #[test]
    fn test_error_transition_keeps_data() {
        let slice = json!({"pending": true, "data": {"foo": 1}, "error": null});
        let next = error_transition(&slice, &json!("boom"));
        assert_eq!(
            next,
            json!({"pending": false, "data": {"foo": 1}, "error": "boom"})
        );
    }

    #[test]
    fn test_transitions_preserve_extra_slice_fields() {
        let slice = json!({"pending": false, "data": null, "error": null, "cursor": 3});
        let next = pending_transition(&slice);
        assert_eq!(next["cursor"], 3);
    }

    #[test]
    fn test_handler_map_keys_are_camel_cased() {
        let module = fetch_module();
        let handlers = module.handlers();
        for key in [
            "fetchXPending",
            "fetchXSuccess",
            "fetchXError",
            "fetchXReset",
        ] {
            assert!(handlers.contains_key(key), "missing handler {}", key);
        }
        assert_eq!(handlers["fetchXPending"].slice, "fetchX");
    }

    #[test]
    fn test_reset_handler_restores_initial_slice() {
        let module = fetch_module();
        let handlers = module.handlers();
        let reset = &handlers["fetchXReset"];
        let mutated = json!({"pending": true, "data": {"x": 1}, "error": "e"});
        let restored = (reset.apply)(&Action::bare("FETCH_X_RESET"), &mutated);
        assert_eq!(restored, OperationState::initial_value());
    }

    #[test]
    fn test_custom_state_and_constants_are_merged() {
        let module = CrudModule::builder("session")
            .items(["LOGIN"])
            .state("isAuthenticated", json!(false))
            .constant("LOGOUT", "LOGOUT")
            .build()
            .unwrap();
        assert_eq!(module.initial_state()["isAuthenticated"], json!(false));
        assert_eq!(module.constant("LOGOUT"), Some("LOGOUT"));
        // Generated entries are untouched by the merge
        assert_eq!(module.constant("LOGIN_PENDING"), Some("LOGIN_PENDING"));
    }

    #[test]
    fn test_custom_handler_overrides_generated_one() {
        let module = CrudModule::builder("session")
            .items(["LOGIN"])
            .handler("loginSuccess", "login", |_action, _slice| {
                json!({"pending": false, "data": "overridden", "error": null})
            })
            .build()
            .unwrap();
        let handlers = module.handlers();
        let next = (handlers["loginSuccess"].apply)(
            &Action::new("LOGIN_SUCCESS", json!("ignored")),
            &OperationState::initial_value(),
        );
        assert_eq!(next["data"], "overridden");
    }

    #[test]
    fn test_custom_handler_for_custom_constant() {
        let module = CrudModule::builder("session")
            .items(["LOGIN"])
            .state("isAuthenticated", json!(false))
            .constant("LOGOUT", "LOGOUT")
            .handler("logout", "isAuthenticated", |_action, _slice| json!(false))
            .build()
            .unwrap();
        let handlers = module.handlers();
        assert_eq!(handlers["logout"].slice, "isAuthenticated");
    }

    // === fail-fast construction ===

    #[test]
    fn test_empty_items_rejected() {
        let err = CrudModule::builder("user").build().unwrap_err();
        assert_eq!(err.error_code(), "NO_OPERATIONS");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = CrudModule::builder("  ").items(["X"]).build().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_MODULE_NAME");
    }

    #[test]
    fn test_duplicate_items_rejected() {
        let err = CrudModule::builder("user")
            .items(["FETCH_X", "fetchX"])
            .build()
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_OPERATION");
    }

    #[test]
    fn test_constant_collision_rejected() {
        let err = CrudModule::builder("user")
            .items(["FETCH_X"])
            .constant("FETCH_X_PENDING", "FETCH_X_PENDING")
            .build()
            .unwrap_err();
        assert_eq!(err.error_code(), "CONSTANT_COLLISION");
    }

    #[test]
    fn test_state_key_collision_rejected() {
        let err = CrudModule::builder("user")
            .items(["FETCH_X"])
            .state("fetchX", json!({}))
            .build()
            .unwrap_err();
        assert_eq!(err.error_code(), "STATE_KEY_COLLISION");
    }

    #[test]
    fn test_operation_state_round_trips() {
        let state: OperationState =
            serde_json::from_value(OperationState::initial_value()).unwrap();
        assert_eq!(state, OperationState::default());
    }
}
