//! Actions: plain data records describing an intended state change
//!
//! An action carries a type tag and an arbitrary JSON payload. Action
//! creators produce them; the store's transition functions consume them.
//! Actions are transient and never stored.

use crate::core::case::camel_case;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dispatched action
///
/// The `kind` field serializes as `"type"` so actions round-trip with the
/// `{type, data}` wire shape used by front-end state containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type tag, e.g. `"FETCH_USER_PENDING"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Arbitrary payload; `Null` when the action carries none
    #[serde(default)]
    pub data: Value,
}

impl Action {
    /// Create an action with a payload
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Create an action without a payload
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }

    /// The camel-cased handler key this action routes to
    ///
    /// `"FETCH_USER_PENDING"` routes to `"fetchUserPending"`.
    pub fn handler_key(&self) -> String {
        camel_case(&self.kind)
    }

    /// Whether the action carries a usable type tag
    ///
    /// Malformed actions (empty type) match no handler and leave state
    /// unchanged; they never crash a transition function.
    pub fn is_well_formed(&self) -> bool {
        !self.kind.is_empty()
    }
}
