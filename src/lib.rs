//! # Trellis Framework
//!
//! A thin scaffolding library for application front-ends in Rust.
//!
//! ## Features
//!
//! - **Declarative Store Modules**: CRUD state, action creators and
//!   transitions synthesized from a list of operation names
//! - **Explicit Composition**: modules satisfy a two-method capability
//!   (initial state + handler map) checked when the store is built
//! - **Rule-Driven Validation**: ordered schemas over eleven rule kinds,
//!   short-circuiting on the first actionable error
//! - **Configuration-Based**: validation schemas and API endpoint tables
//!   load from YAML
//! - **Thin Collaborators**: async `ApiClient` and `KeyValueStore` contracts
//!   with a reqwest client (`http` feature) and an in-memory store
//!   (`in-memory` feature, default)
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::prelude::*;
//! use serde_json::json;
//!
//! // One store module, two generated operations
//! let session = CrudModule::builder("session")
//!     .items(["LOGIN", "FETCH_PROFILE"])
//!     .state("isAuthenticated", json!(false))
//!     .build()
//!     .unwrap();
//! let login = session.actions("login").unwrap().clone();
//!
//! // Compose exactly one store at the application root
//! let mut registry = ModuleRegistry::new();
//! registry.register(session).unwrap();
//! let mut store = Store::from_registry(registry).unwrap();
//!
//! store.dispatch(&login.pending());
//! store.dispatch(&login.success(json!({"token": "abc"})));
//! assert_eq!(
//!     store.slice("session", "login").unwrap()["data"]["token"],
//!     json!("abc")
//! );
//!
//! // Validate a payload before dispatching a thunk
//! let schema = ValidationSchema::new()
//!     .with_field("email", FieldRule::new("Email", RuleKind::Email))
//!     .with_field("password", FieldRule::new("Password", RuleKind::Password));
//! let report = schema.validate(&json!({"email": "user@example.com", "password": "hunter2"}));
//! assert!(report.is_valid());
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod storage;
pub mod store;
pub mod validation;

/// Initialize tracing with an env-filter subscriber
///
/// Convenience for binaries and tests; libraries embedding trellis usually
/// install their own subscriber instead.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        action::Action,
        case::{camel_case, constant_case},
        error::{ClientError, ConfigError, StoreError, TrellisError, TrellisResult},
        module::{HandlerMap, ModuleState, SliceTransition, StoreModule, TransitionFn},
    };

    // === Store ===
    pub use crate::store::{
        ActionFactory, CrudModule, CrudModuleBuilder, ModuleRegistry, OperationState, Store,
    };

    // === Validation ===
    pub use crate::validation::{
        FieldRule, RuleKind, RuleOptions, ValidationReport, ValidationSchema,
    };

    // === Config ===
    pub use crate::config::{ClientConfig, EndpointConfig, HttpMethod};

    // === Collaborators ===
    pub use crate::client::ApiClient;
    #[cfg(feature = "http")]
    pub use crate::client::HttpClient;
    pub use crate::storage::KeyValueStore;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStorage;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use indexmap::IndexMap;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
