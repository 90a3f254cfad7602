//! Runtime classification of input values.
//!
//! Every schema starts by asking what kind of value it was handed. The input
//! is an `Option<&Value>` where `None` stands for an absent value (a missing
//! object field, or an explicitly undefined root).

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

/// The runtime kind of an input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classifies an input.
    ///
    /// ```rust
    /// use sift::ValueKind;
    /// use serde_json::json;
    ///
    /// assert_eq!(ValueKind::of(None), ValueKind::Undefined);
    /// assert_eq!(ValueKind::of(Some(&json!(null))), ValueKind::Null);
    /// assert_eq!(ValueKind::of(Some(&json!([1]))), ValueKind::Array);
    /// ```
    pub fn of(input: Option<&Value>) -> Self {
        match input {
            None => ValueKind::Undefined,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the single `invalid_type` failure every schema reports when the
/// input has the wrong kind.
///
/// An absent input reads `Required`; otherwise the message names both kinds.
/// `custom` replaces the message in either case.
pub(crate) fn invalid_type<T>(
    path: &IssuePath,
    expected: &str,
    input: Option<&Value>,
    custom: Option<&String>,
) -> Validation<T, Issues> {
    let received = ValueKind::of(input);
    let message = match custom {
        Some(message) => message.clone(),
        None if received == ValueKind::Undefined => "Required".to_string(),
        None => format!("Expected {}, received {}", expected, received),
    };
    Validation::Failure(Issues::single(
        Issue::new(path.clone(), IssueCode::InvalidType, message)
            .with_expected(expected)
            .with_received(received.name()),
    ))
}

/// Collects per-constraint issues into a validation result.
pub(crate) fn finish<T>(value: T, issues: Vec<Issue>) -> Validation<T, Issues> {
    match Issues::from_vec(issues) {
        None => Validation::Success(value),
        Some(issues) => Validation::Failure(issues),
    }
}

/// Structural equality used by literals and array uniqueness.
///
/// Object key order is ignored. Two integers compare exactly; once either
/// side is a float both compare as `f64`, so `1` equals `1.0`.
pub(crate) fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| same_value(x, y)))
        }
        (x, y) => x == y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind() {
        let cases = [
            (json!(null), ValueKind::Null),
            (json!(false), ValueKind::Boolean),
            (json!(1.5), ValueKind::Number),
            (json!("x"), ValueKind::String),
            (json!([]), ValueKind::Array),
            (json!({}), ValueKind::Object),
        ];
        for (value, kind) in cases {
            assert_eq!(ValueKind::of(Some(&value)), kind);
        }
        assert_eq!(ValueKind::of(None).to_string(), "undefined");
    }

    #[test]
    fn test_invalid_type_messages() {
        let path = IssuePath::root();

        let missing = invalid_type::<()>(&path, "string", None, None);
        let issues = missing.into_result().unwrap_err();
        assert_eq!(issues.first().message, "Required");
        assert_eq!(issues.first().received.as_deref(), Some("undefined"));

        let wrong = invalid_type::<()>(&path, "string", Some(&json!(3)), None);
        let issues = wrong.into_result().unwrap_err();
        assert_eq!(issues.first().message, "Expected string, received number");
        assert_eq!(issues.first().code, IssueCode::InvalidType);

        let custom = "need text".to_string();
        let overridden = invalid_type::<()>(&path, "string", None, Some(&custom));
        assert_eq!(overridden.into_result().unwrap_err().first().message, "need text");
    }

    #[test]
    fn test_same_value_ignores_key_order() {
        assert!(same_value(&json!({"a": 1, "b": [2]}), &json!({"b": [2], "a": 1})));
        assert!(!same_value(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!same_value(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_same_value_numbers() {
        assert!(same_value(&json!(1), &json!(1.0)));
        assert!(same_value(&json!([1]), &json!([1.0])));
        assert!(!same_value(&json!(9007199254740993u64), &json!(9007199254740992u64)));
        assert!(!same_value(&json!(-1), &json!(u64::MAX)));
        assert!(!same_value(&json!(1), &json!("1")));
    }
}
