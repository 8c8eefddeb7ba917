//! Validation rule kinds and their checks
//!
//! Each rule kind is one check over a `serde_json::Value`. Checks return
//! `Ok(())` on pass and the rule's failure phrase on fail; the schema layer
//! prefixes the field title to build the final message.

use crate::core::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Minimum password length applied when `typeOptions.min` is absent
pub const DEFAULT_PASSWORD_MIN: usize = 4;

/// The fixed enumeration of validation rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// Value is present (not null/absent)
    Required,
    /// Value is a string
    String,
    /// Value is numeric
    Number,
    /// Value matches a standard email shape
    Email,
    /// Value is a string of at least `min` characters (default 4)
    Password,
    /// Value's length is within `[min, max]`; a missing bound is unbounded
    Length,
    /// Value is a list
    Array,
    /// Value equals one member of `options`
    OneOf,
    /// Value is a plain key-value map (not an array, not null)
    IsObject,
    /// Value is a URL-safe slug (lowercase alphanumerics and hyphens)
    Slug,
    /// Value is a slug path: slug segments separated by `/`
    NestedSlug,
}

impl RuleKind {
    /// The rule name as it appears in schema documents
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::String => "string",
            RuleKind::Number => "number",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
            RuleKind::Length => "length",
            RuleKind::Array => "array",
            RuleKind::OneOf => "oneOf",
            RuleKind::IsObject => "isObject",
            RuleKind::Slug => "slug",
            RuleKind::NestedSlug => "nestedSlug",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(RuleKind::Required),
            "string" => Ok(RuleKind::String),
            "number" => Ok(RuleKind::Number),
            "email" => Ok(RuleKind::Email),
            "password" => Ok(RuleKind::Password),
            "length" => Ok(RuleKind::Length),
            "array" => Ok(RuleKind::Array),
            "oneOf" => Ok(RuleKind::OneOf),
            "isObject" => Ok(RuleKind::IsObject),
            "slug" => Ok(RuleKind::Slug),
            "nestedSlug" => Ok(RuleKind::NestedSlug),
            other => Err(ConfigError::UnknownRuleType {
                rule: other.to_string(),
            }),
        }
    }
}

/// Rule-specific parameters
///
/// `min`/`max` parameterize `password` and `length`; `options` is the
/// allowed set for `oneOf`. Unused fields are ignored by the other kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub options: Vec<Value>,
}

impl RuleOptions {
    /// Options with only a lower bound
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// Options with both bounds
    pub fn range(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            options: Vec::new(),
        }
    }

    /// Options carrying an allowed set for `oneOf`
    pub fn one_of(options: impl IntoIterator<Item = Value>) -> Self {
        Self {
            options: options.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Run one rule check against a value
///
/// Returns the rule's failure phrase on fail; the caller prefixes the field
/// title.
pub(crate) fn check(kind: RuleKind, value: &Value, options: &RuleOptions) -> Result<(), String> {
    match kind {
        RuleKind::Required => {
            if value.is_null() {
                Err("is required".to_string())
            } else {
                Ok(())
            }
        }
        RuleKind::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err("must be a string".to_string())
            }
        }
        RuleKind::Number => {
            if value.is_number() {
                Ok(())
            } else {
                Err("must be a number".to_string())
            }
        }
        RuleKind::Email => match value.as_str() {
            Some(s) if is_valid_email(s) => Ok(()),
            _ => Err("must be a valid email address".to_string()),
        },
        RuleKind::Password => {
            let min = options.min.unwrap_or(DEFAULT_PASSWORD_MIN);
            match value.as_str() {
                Some(s) if s.len() >= min => Ok(()),
                _ => Err(format!("must be at least {} characters long", min)),
            }
        }
        RuleKind::Length => check_length(value, options),
        RuleKind::Array => {
            if value.is_array() {
                Ok(())
            } else {
                Err("must be a list".to_string())
            }
        }
        RuleKind::OneOf => {
            if options.options.iter().any(|allowed| allowed == value) {
                Ok(())
            } else {
                Err(format!("must be one of: {}", render_set(&options.options)))
            }
        }
        RuleKind::IsObject => {
            if value.is_object() {
                Ok(())
            } else {
                Err("must be an object".to_string())
            }
        }
        RuleKind::Slug => match value.as_str() {
            Some(s) if is_valid_slug(s) => Ok(()),
            _ => Err("must be a lowercase slug (letters, digits and hyphens)".to_string()),
        },
        RuleKind::NestedSlug => match value.as_str() {
            Some(s) if is_valid_nested_slug(s) => Ok(()),
            _ => Err("must be a slug path (slug segments separated by '/')".to_string()),
        },
    }
}

/// Length check: string byte length or array element count
///
/// A value with no measurable length fails with the bound phrase, matching
/// the behavior of comparing an absent length against a bound.
fn check_length(value: &Value, options: &RuleOptions) -> Result<(), String> {
    let phrase = match (options.min, options.max) {
        (Some(min), Some(max)) => format!("must be between {} and {} characters long", min, max),
        (Some(min), None) => format!("must be at least {} characters long", min),
        (None, Some(max)) => format!("must be at most {} characters long", max),
        (None, None) => "must have a measurable length".to_string(),
    };

    let len = match value {
        Value::String(s) => s.len(),
        Value::Array(items) => items.len(),
        _ => return Err(phrase),
    };

    let above_min = options.min.is_none_or(|min| len >= min);
    let below_max = options.max.is_none_or(|max| len <= max);
    if above_min && below_max {
        Ok(())
    } else {
        Err(phrase)
    }
}

fn render_set(options: &[Value]) -> String {
    options
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}

fn is_valid_slug(slug: &str) -> bool {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = SLUG_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
    regex.is_match(slug)
}

fn is_valid_nested_slug(slug: &str) -> bool {
    static NESTED_SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NESTED_SLUG_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*(?:/[a-z0-9]+(?:-[a-z0-9]+)*)*$").unwrap()
    });
    regex.is_match(slug)
}
