//! Integration tests for the rule-driven validator

use serde_json::json;
use trellis::prelude::*;

/// One representative valid and invalid value per rule kind
#[test]
fn test_every_rule_kind_passes_and_fails() {
    let cases = vec![
        (RuleKind::Required, json!("x"), json!(null)),
        (RuleKind::String, json!("x"), json!(1)),
        (RuleKind::Number, json!(1.5), json!("1.5")),
        (
            RuleKind::Email,
            json!("user@example.com"),
            json!("user@@example"),
        ),
        (RuleKind::Password, json!("s3cret"), json!("abc")),
        (RuleKind::Array, json!([1]), json!("not a list")),
        (RuleKind::IsObject, json!({"a": 1}), json!([1])),
        (RuleKind::Slug, json!("my-post"), json!("My Post")),
        (
            RuleKind::NestedSlug,
            json!("docs/getting-started"),
            json!("docs//oops"),
        ),
    ];

    for (kind, valid, invalid) in cases {
        let rule = FieldRule::new("Field", kind);

        let report = rule.validate(&valid);
        assert!(report.is_valid(), "{} rejected {:?}", kind, valid);

        let report = rule.validate(&invalid);
        assert!(!report.is_valid(), "{} accepted {:?}", kind, invalid);
        let message = report.message.expect("failure carries a message");
        assert!(!message.is_empty());
        assert!(message.starts_with("Field "));
    }
}

#[test]
fn test_length_rule_with_options() {
    let rule = FieldRule::with_options("Username", RuleKind::Length, RuleOptions::range(3, 12));
    assert!(rule.validate(&json!("sam")).is_valid());
    assert!(!rule.validate(&json!("ab")).is_valid());
    assert!(!rule.validate(&json!("far-too-long-name")).is_valid());
}

#[test]
fn test_one_of_rule_with_options() {
    let rule = FieldRule::with_options(
        "Role",
        RuleKind::OneOf,
        RuleOptions::one_of([json!("admin"), json!("member")]),
    );
    assert!(rule.validate(&json!("member")).is_valid());

    let report = rule.validate(&json!("guest"));
    assert!(!report.is_valid());
    assert!(report.message.unwrap().contains("admin"));
}

#[test]
fn test_schema_reports_first_failing_field() {
    // Schema {a: required, b: email} with empty payload: both fields fail,
    // the report must name `a`.
    let schema = ValidationSchema::new()
        .with_field("a", FieldRule::new("A", RuleKind::Required))
        .with_field("b", FieldRule::new("B", RuleKind::Email));

    let report = schema.validate(&json!({}));
    assert!(!report.is_valid());
    assert_eq!(report.field.as_deref(), Some("a"));
    assert!(report.message.unwrap().starts_with("A "));
}

#[test]
fn test_schema_checks_fields_in_declared_order_not_payload_order() {
    let schema = ValidationSchema::new()
        .with_field("first", FieldRule::new("First", RuleKind::Number))
        .with_field("second", FieldRule::new("Second", RuleKind::Number));

    // Both payload values are invalid; declaration order decides the report.
    let report = schema.validate(&json!({"second": "x", "first": "y"}));
    assert_eq!(report.field.as_deref(), Some("first"));
}

#[test]
fn test_schema_all_valid_ignores_extra_payload_keys() {
    let schema = ValidationSchema::new()
        .with_field("email", FieldRule::new("Email", RuleKind::Email))
        .with_field("age", FieldRule::new("Age", RuleKind::Number));

    let report = schema.validate(&json!({
        "email": "user@example.com",
        "age": 30,
        "unvalidated": {"anything": true},
    }));
    assert!(report.is_valid());
    assert_eq!(report.message, None);
    assert_eq!(report.field, None);
}

#[test]
fn test_schema_loaded_from_yaml_behaves_like_built_schema() {
    let yaml = r#"
email:
  fieldTitle: Email
  type: email
password:
  fieldTitle: Password
  type: password
  typeOptions:
    min: 8
role:
  fieldTitle: Role
  type: oneOf
  typeOptions:
    options: [admin, member]
"#;
    let schema = ValidationSchema::from_yaml_str(yaml).unwrap();

    let ok = schema.validate(&json!({
        "email": "user@example.com",
        "password": "longenough",
        "role": "admin",
    }));
    assert!(ok.is_valid());

    let short = schema.validate(&json!({
        "email": "user@example.com",
        "password": "short",
        "role": "admin",
    }));
    assert_eq!(short.field.as_deref(), Some("password"));
    assert!(short.message.unwrap().contains("8"));
}

#[test]
fn test_unknown_rule_type_fails_schema_loading() {
    let yaml = r#"
name:
  fieldTitle: Name
  type: uppercase
"#;
    let err = ValidationSchema::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, TrellisError::Config(_)));
}

#[test]
fn test_validation_failure_is_data_not_error() {
    // A failing check returns a report; nothing here returns Result.
    let rule = FieldRule::new("Email", RuleKind::Email);
    let report = rule.validate(&json!("broken"));
    assert!(!report.status);
    assert!(report.message.is_some());
}
