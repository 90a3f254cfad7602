//! Union schema: the first alternative that accepts the input wins.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::kind::ValueKind;
use super::traits::{BoxedSchema, SchemaLike};

/// Tries each alternative in declaration order.
///
/// The output is whatever the first successful alternative produced, so an
/// earlier alternative shadows a later one that would also accept the input.
/// When every alternative fails, the individual failures are discarded and a
/// single `invalid_union` issue is reported at the union's path.
///
/// # Example
///
/// ```rust
/// use sift::{v, IssueCode, SchemaExt};
/// use serde_json::json;
///
/// let id = v::union([v::number().int().boxed(), v::string().uuid().boxed()]);
///
/// assert!(id.parse(&json!(42)).is_ok());
/// assert!(id.parse(&json!("123e4567-e89b-12d3-a456-426614174000")).is_ok());
///
/// let err = id.parse(&json!("42")).unwrap_err();
/// assert_eq!(err.len(), 1);
/// assert_eq!(err.first().code, IssueCode::InvalidUnion);
/// ```
#[derive(Clone, Default)]
pub struct UnionSchema {
    options: Vec<BoxedSchema>,
    message: Option<String>,
}

impl UnionSchema {
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = BoxedSchema>,
    {
        Self {
            options: options.into_iter().collect(),
            message: None,
        }
    }

    /// Appends an alternative, tried after the existing ones.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let flag = v::union([]).or(v::boolean()).or(v::literal("yes").unwrap());
    /// assert!(flag.parse(&json!("yes")).is_ok());
    /// assert!(flag.parse(&json!("no")).is_err());
    /// ```
    pub fn or<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.options.push(Arc::new(schema));
        self
    }

    /// Replaces the failure message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn options(&self) -> &[BoxedSchema] {
        &self.options
    }
}

impl SchemaLike for UnionSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        for option in &self.options {
            if let Validation::Success(value) = option.validate(input, path) {
                return Validation::Success(value);
            }
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Invalid input".to_string());
        Validation::Failure(Issues::single(
            Issue::new(path.clone(), IssueCode::InvalidUnion, message)
                .with_received(ValueKind::of(input).name()),
        ))
    }

    fn type_name(&self) -> &'static str {
        "union"
    }
}
