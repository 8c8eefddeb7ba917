//! Core module containing fundamental traits and types for the framework

pub mod action;
pub mod case;
pub mod error;
pub mod module;

pub use action::Action;
pub use case::{camel_case, constant_case};
pub use error::{ClientError, ConfigError, StoreError, TrellisError, TrellisResult};
pub use module::{HandlerMap, ModuleState, SliceTransition, StoreModule, TransitionFn};
