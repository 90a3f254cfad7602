//! Integration tests for union schemas.

use serde_json::json;
use sift::{v, IssueCode, SchemaExt};

#[test]
fn test_literal_union_rejects_other_values() {
    let grade = v::union([
        v::literal("a").unwrap().boxed(),
        v::literal("b").unwrap().boxed(),
    ]);
    assert!(grade.parse(&json!("a")).is_ok());
    assert!(grade.parse(&json!("b")).is_ok());

    let err = grade.parse(&json!("c")).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.first().code, IssueCode::InvalidUnion);
    assert!(err.first().path.is_root());
}

#[test]
fn test_declaration_order_decides_output() {
    let as_number = v::string()
        .regex(r"^\d+$")
        .unwrap()
        .transform(|s| s.as_str().unwrap_or_default().parse::<i64>().map(Into::into));
    let schema = v::union([as_number.boxed(), v::string().boxed()]);

    assert_eq!(schema.parse(&json!("12")).unwrap(), json!(12));
    assert_eq!(schema.parse(&json!("twelve")).unwrap(), json!("twelve"));

    let reversed = v::union([v::string().boxed()]).or(v::string().regex(r"^\d+$").unwrap());
    assert_eq!(reversed.parse(&json!("12")).unwrap(), json!("12"));
}

#[test]
fn test_union_inside_object_reports_at_field() {
    let schema = v::object().field(
        "id",
        v::union([v::number().int().boxed(), v::string().uuid().boxed()]),
    );
    let err = schema.parse(&json!({"id": true})).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.first().path.to_string(), "id");
    assert_eq!(err.first().message, "Invalid input");
}

#[test]
fn test_optional_union() {
    let schema = v::object().field(
        "limit",
        v::union([v::number().boxed(), v::null().boxed()]).optional(),
    );
    assert!(schema.parse(&json!({})).is_ok());
    assert!(schema.parse(&json!({"limit": null})).is_ok());
    assert!(schema.parse(&json!({"limit": "10"})).is_err());
}
