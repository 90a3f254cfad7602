//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays where every
//! element must satisfy an element schema, with cardinality and uniqueness
//! constraints on the array itself.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::kind::{finish, invalid_type, same_value};
use super::traits::SchemaLike;

#[derive(Clone)]
enum ArrayConstraint {
    Min { min: usize, message: Option<String> },
    Max { max: usize, message: Option<String> },
    Length { len: usize, message: Option<String> },
    Unique { message: Option<String> },
}

impl ArrayConstraint {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            ArrayConstraint::Min { message, .. }
            | ArrayConstraint::Max { message, .. }
            | ArrayConstraint::Length { message, .. }
            | ArrayConstraint::Unique { message } => message,
        }
    }
}

/// A schema for validating arrays.
///
/// Validation never stops at the first bad element. Issues about the array
/// itself (its size) come first, at the array's path, followed by every
/// element's issues in index order with the index appended to the path.
///
/// # Example
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::array(v::string().email()).min(1);
///
/// let err = schema.parse(&json!(["a@b.co", "nope", "also nope"])).unwrap_err();
/// let paths: Vec<String> = err.issues().iter().map(|i| i.path.to_string()).collect();
/// assert_eq!(paths, vec!["[1]", "[2]"]);
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    element: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    pub fn new(element: S) -> Self {
        Self {
            element,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// The schema every element is validated against.
    pub fn element(&self) -> &S {
        &self.element
    }

    /// At least `min` elements.
    pub fn min(self, min: usize) -> Self {
        self.push(ArrayConstraint::Min { min, message: None })
    }

    /// At most `max` elements.
    pub fn max(self, max: usize) -> Self {
        self.push(ArrayConstraint::Max { max, message: None })
    }

    /// Exactly `len` elements.
    pub fn length(self, len: usize) -> Self {
        self.push(ArrayConstraint::Length { len, message: None })
    }

    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Rejects arrays containing two equal elements.
    ///
    /// Elements are compared as given, before the element schema runs.
    /// Object key order is ignored and `1` equals `1.0`.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let tags = v::array(v::string()).unique();
    /// assert!(tags.parse(&json!(["a", "b"])).is_ok());
    ///
    /// let err = tags.parse(&json!(["a", "b", "a"])).unwrap_err();
    /// assert_eq!(err.first().message, "Array elements must be unique");
    /// ```
    pub fn unique(self) -> Self {
        self.push(ArrayConstraint::Unique { message: None })
    }

    /// Sets the message of the most recent constraint, or of the type check
    /// when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(last) => *last.message_mut() = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn push(mut self, constraint: ArrayConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let items = match input {
            Some(Value::Array(items)) => items,
            _ => return invalid_type(path, "array", input, self.type_error_message.as_ref()),
        };

        let mut issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, items, path))
            .collect();

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.element.validate(Some(item), &path.index(index)) {
                Validation::Success(value) => output.push(value.unwrap_or(Value::Null)),
                Validation::Failure(errors) => issues.extend(errors),
            }
        }

        finish(Some(Value::Array(output)), issues)
    }

    fn type_name(&self) -> &'static str {
        "array"
    }
}

fn check_constraint(
    constraint: &ArrayConstraint,
    items: &[Value],
    path: &IssuePath,
) -> Option<Issue> {
    let len = items.len();
    let sized = |code: IssueCode, message: &Option<String>, default: String, expected: String| {
        Issue::new(path.clone(), code, message.clone().unwrap_or(default))
            .with_expected(expected)
            .with_received(format!("{} elements", len))
    };

    match constraint {
        ArrayConstraint::Min { min, message } => (len < *min).then(|| {
            sized(
                IssueCode::TooSmall,
                message,
                format!("Array must contain at least {} element(s)", min),
                format!("at least {} elements", min),
            )
        }),
        ArrayConstraint::Max { max, message } => (len > *max).then(|| {
            sized(
                IssueCode::TooBig,
                message,
                format!("Array must contain at most {} element(s)", max),
                format!("at most {} elements", max),
            )
        }),
        ArrayConstraint::Length { len: exact, message } => (len != *exact).then(|| {
            let code = if len < *exact {
                IssueCode::TooSmall
            } else {
                IssueCode::TooBig
            };
            sized(
                code,
                message,
                format!("Array must contain exactly {} element(s)", exact),
                format!("exactly {} elements", exact),
            )
        }),
        ArrayConstraint::Unique { message } => {
            let duplicates = duplicate_indices(items);
            (!duplicates.is_empty()).then(|| {
                Issue::custom(
                    path.clone(),
                    message
                        .clone()
                        .unwrap_or_else(|| "Array elements must be unique".to_string()),
                )
                .with_expected("unique elements")
                .with_received(format!("duplicates at indices {:?}", duplicates))
            })
        }
    }
}

/// Indices of every element equal to an earlier one.
fn duplicate_indices(items: &[Value]) -> Vec<usize> {
    (1..items.len())
        .filter(|&index| {
            items[..index]
                .iter()
                .any(|earlier| same_value(earlier, &items[index]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnySchema, NumberSchema, StringSchema};
    use serde_json::json;

    fn check<S: SchemaLike>(
        schema: &ArraySchema<S>,
        value: Value,
    ) -> Validation<Option<Value>, Issues> {
        schema.validate(Some(&value), &IssuePath::root())
    }

    #[test]
    fn test_accepts_empty_array() {
        let schema = ArraySchema::new(StringSchema::new());
        assert_eq!(check(&schema, json!([])).into_result().unwrap(), Some(json!([])));
    }

    #[test]
    fn test_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new()).min(1);
        let issues = check(&schema, json!({"0": "a"})).into_result().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().message, "Expected array, received object");
    }

    #[test]
    fn test_collects_every_element_issue() {
        let schema = ArraySchema::new(NumberSchema::new().int());
        let issues = check(&schema, json!([1, "two", 3.5, 4, null]))
            .into_result()
            .unwrap_err();
        let paths: Vec<String> = issues.iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["[1]", "[2]", "[4]"]);
    }

    #[test]
    fn test_cardinality_issues_come_first() {
        let schema = ArraySchema::new(StringSchema::new()).max(2);
        let issues = check(&schema, json!(["a", 1, "c"])).into_result().unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.first().code, IssueCode::TooBig);
        assert!(issues.first().path.is_root());
        assert_eq!(issues.iter().nth(1).unwrap().path.to_string(), "[1]");
    }

    #[test]
    fn test_length_constraints() {
        let schema = ArraySchema::new(NumberSchema::new()).length(2);
        assert!(check(&schema, json!([1, 2])).is_success());
        let issues = check(&schema, json!([1])).into_result().unwrap_err();
        assert_eq!(issues.first().code, IssueCode::TooSmall);
        assert_eq!(issues.first().message, "Array must contain exactly 2 element(s)");

        let nonempty = ArraySchema::new(NumberSchema::new()).nonempty();
        let issues = check(&nonempty, json!([])).into_result().unwrap_err();
        assert_eq!(issues.first().message, "Array must contain at least 1 element(s)");
    }

    #[test]
    fn test_output_uses_element_output() {
        let schema = ArraySchema::new(crate::schema::WithDefault::new(
            crate::schema::Nullable::new(StringSchema::new()),
            json!("unused"),
        ));
        assert_eq!(
            check(&schema, json!(["a", null])).into_result().unwrap(),
            Some(json!(["a", null]))
        );
    }

    #[test]
    fn test_unique() {
        let schema = ArraySchema::new(NumberSchema::new()).unique();
        assert!(check(&schema, json!([1, 2, 3])).is_success());

        let issues = check(&schema, json!([1, 2, 1, 2])).into_result().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().code, IssueCode::Custom);
        assert_eq!(
            issues.first().received.as_deref(),
            Some("duplicates at indices [2, 3]")
        );
    }

    #[test]
    fn test_unique_compares_by_value() {
        let schema = ArraySchema::new(AnySchema).unique();

        let reordered = json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]);
        let issues = check(&schema, reordered).into_result().unwrap_err();
        assert_eq!(
            issues.first().received.as_deref(),
            Some("duplicates at indices [1]")
        );

        assert!(check(&schema, json!([1, 1.0])).is_failure());
        assert!(check(&schema, json!([1, "1", [1], {"1": 1}])).is_success());
    }

    #[test]
    fn test_custom_messages() {
        let schema = ArraySchema::new(StringSchema::new())
            .error("tags must be a list")
            .min(1)
            .error("add at least one tag");
        let issues = check(&schema, json!("tag")).into_result().unwrap_err();
        assert_eq!(issues.first().message, "tags must be a list");
        let issues = check(&schema, json!([])).into_result().unwrap_err();
        assert_eq!(issues.first().message, "add at least one tag");
    }
}
