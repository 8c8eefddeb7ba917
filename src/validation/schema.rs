//! Declarative validation schemas
//!
//! A schema maps field names to rules. Evaluation walks the fields in
//! declared order and stops at the first failure, so the caller always gets
//! the first actionable error rather than an exhaustive report.

use crate::core::error::TrellisResult;
use crate::validation::rules::{self, RuleKind, RuleOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field's validation rule
///
/// Serializes with the `fieldTitle`/`type`/`typeOptions` keys so schema
/// documents read the same in YAML, JSON or code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Display name used to build failure messages
    #[serde(rename = "fieldTitle")]
    pub field_title: String,

    /// Which check to run
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Rule-specific parameters
    #[serde(rename = "typeOptions", default, skip_serializing_if = "is_default")]
    pub options: RuleOptions,
}

fn is_default(options: &RuleOptions) -> bool {
    *options == RuleOptions::default()
}

impl FieldRule {
    /// Create a rule with default options
    pub fn new(field_title: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            field_title: field_title.into(),
            kind,
            options: RuleOptions::default(),
        }
    }

    /// Create a rule with explicit options
    pub fn with_options(
        field_title: impl Into<String>,
        kind: RuleKind,
        options: RuleOptions,
    ) -> Self {
        Self {
            field_title: field_title.into(),
            kind,
            options,
        }
    }

    /// Validate a single value against this rule
    pub fn validate(&self, value: &Value) -> ValidationReport {
        match rules::check(self.kind, value, &self.options) {
            Ok(()) => ValidationReport::pass(),
            Err(phrase) => ValidationReport::fail(format!("{} {}", self.field_title, phrase)),
        }
    }
}

/// Outcome of a validation call
///
/// A failed check is expected data, not a fault: `status` is `false`,
/// `message` carries the human-readable reason and `field` names the
/// offending schema field when the failure came from schema evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub status: bool,
    pub message: Option<String>,
    pub field: Option<String>,
}

impl ValidationReport {
    /// A passing report
    pub fn pass() -> Self {
        Self {
            status: true,
            message: None,
            field: None,
        }
    }

    /// A failing report with a message
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
            field: None,
        }
    }

    /// Attach the schema field this report belongs to
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Whether the validated value passed
    pub fn is_valid(&self) -> bool {
        self.status
    }
}

/// An ordered set of field rules
///
/// Field order is the evaluation order. Schemas deserialize directly from
/// flat YAML/JSON documents:
///
/// ```yaml
/// email:
///   fieldTitle: Email
///   type: email
/// password:
///   fieldTitle: Password
///   type: password
///   typeOptions:
///     min: 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSchema {
    #[serde(flatten)]
    fields: IndexMap<String, FieldRule>,
}

impl ValidationSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule, keeping declaration order
    pub fn with_field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// Load a schema from a YAML string
    pub fn from_yaml_str(yaml: &str) -> TrellisResult<Self> {
        let schema: Self = serde_yaml::from_str(yaml)?;
        Ok(schema)
    }

    /// Load a schema from a YAML file
    pub fn from_yaml_file(path: &str) -> TrellisResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Validate a payload against every declared field, in order
    ///
    /// A payload key that is absent validates as `null`. Evaluation stops at
    /// the first failing field and returns its report augmented with the
    /// field name; extra payload keys with no schema entry are ignored.
    pub fn validate(&self, payload: &Value) -> ValidationReport {
        let map = payload.as_object();
        for (name, rule) in &self.fields {
            let value = map
                .and_then(|m| m.get(name.as_str()))
                .unwrap_or(&Value::Null);
            let report = rule.validate(value);
            if !report.status {
                tracing::debug!(field = %name, "schema validation failed");
                return report.for_field(name.as_str());
            }
        }
        ValidationReport::pass()
    }
}
