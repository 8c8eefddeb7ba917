//! Rule-driven validation
//!
//! A declarative approach to validating payloads before they reach stores or
//! API calls: each field names a rule kind and its options, the evaluator
//! walks the schema in declared order and short-circuits on the first
//! failure.

pub mod rules;
pub mod schema;

pub use rules::{DEFAULT_PASSWORD_MIN, RuleKind, RuleOptions};
pub use schema::{FieldRule, ValidationReport, ValidationSchema};
