//! Module system for trellis
//!
//! Defines the capability every store module must satisfy so the composition
//! root can assemble a state tree without probing for optional methods: an
//! initial-state provider and an action-handler-map provider. [`CrudModule`]
//! implements it; hand-written modules can too.
//!
//! [`CrudModule`]: crate::store::CrudModule

use crate::core::action::Action;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The state owned by one module: slice key → slice value
///
/// Order-preserving so the assembled state tree lists slices in declaration
/// order.
pub type ModuleState = IndexMap<String, Value>;

/// A pure state-transition function: `(action, current slice) -> next slice`
pub type TransitionFn = Arc<dyn Fn(&Action, &Value) -> Value + Send + Sync>;

/// A transition bound to the state slice it rewrites
///
/// Handler maps key transitions by camel-cased action type; the target slice
/// is carried explicitly so the store never has to guess which part of the
/// module state a handler owns.
#[derive(Clone)]
pub struct SliceTransition {
    /// Key of the state slice this transition replaces
    pub slice: String,

    /// The transition function itself
    pub apply: TransitionFn,
}

impl SliceTransition {
    /// Bind a transition function to a slice key
    pub fn new(
        slice: impl Into<String>,
        apply: impl Fn(&Action, &Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            slice: slice.into(),
            apply: Arc::new(apply),
        }
    }
}

impl fmt::Debug for SliceTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceTransition")
            .field("slice", &self.slice)
            .finish_non_exhaustive()
    }
}

/// Mapping from camel-cased action type to its transition
pub type HandlerMap = IndexMap<String, SliceTransition>;

/// Capability trait for store modules
///
/// The composition root calls `initial_state` and `handlers` exactly once
/// per module when building the store. Both must be deterministic: same
/// module, same output.
pub trait StoreModule: Send + Sync {
    /// Unique module name; becomes the module's key in the state tree
    fn name(&self) -> &str;

    /// The module's initial state (generated slices plus custom fields)
    fn initial_state(&self) -> ModuleState;

    /// The module's transition map, keyed by camel-cased action type
    fn handlers(&self) -> HandlerMap;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slice_transition_applies() {
        let transition = SliceTransition::new("counter", |action, slice| {
            json!({ "last": action.kind, "previous": slice })
        });
        let next = (transition.apply)(&Action::bare("TICK"), &json!(1));
        assert_eq!(next["last"], "TICK");
        assert_eq!(next["previous"], 1);
    }

    #[test]
    fn test_slice_transition_debug_names_slice() {
        let transition = SliceTransition::new("counter", |_, slice| slice.clone());
        let rendered = format!("{:?}", transition);
        assert!(rendered.contains("counter"));
    }
}
