//! Schemas for single-valued inputs: booleans, literals, enums and the
//! kind-only checks (`null`, undefined, void, any, unknown).

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::kind::{invalid_type, same_value, ValueKind};
use super::traits::SchemaLike;

/// Accepts `true` or `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            type_error_message: None,
        }
    }

    /// Replaces the type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for BooleanSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            Some(value @ Value::Bool(_)) => Validation::Success(Some(value.clone())),
            _ => invalid_type(path, "boolean", input, self.type_error_message.as_ref()),
        }
    }

    fn type_name(&self) -> &'static str {
        "boolean"
    }
}

/// Accepts exactly one primitive value.
///
/// Numbers are compared by value, so a literal `1` accepts `1.0`. Values of
/// different kinds never match: `"1"` is not `1`.
///
/// ```rust
/// use sift::{v, IssueCode, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::literal("admin").unwrap();
/// assert!(schema.parse(&json!("admin")).is_ok());
///
/// let err = schema.parse(&json!("user")).unwrap_err();
/// assert_eq!(err.first().code, IssueCode::InvalidLiteral);
/// assert_eq!(err.first().message, "Invalid literal value, expected \"admin\"");
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    value: Value,
    message: Option<String>,
}

impl LiteralSchema {
    /// Fails for arrays and objects, which are not literals.
    pub fn new(value: impl Into<Value>) -> Result<Self, BuildError> {
        let value = value.into();
        match value {
            Value::Array(_) | Value::Object(_) => Err(BuildError::NonPrimitiveLiteral(
                ValueKind::of(Some(&value)).name(),
            )),
            value => Ok(Self {
                value,
                message: None,
            }),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn matches(&self, input: &Value) -> bool {
        same_value(&self.value, input)
    }
}

impl SchemaLike for LiteralSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            Some(value) if self.matches(value) => Validation::Success(Some(value.clone())),
            _ => {
                let message = self.message.clone().unwrap_or_else(|| {
                    format!("Invalid literal value, expected {}", self.value)
                });
                let received = match input {
                    Some(value) => value.to_string(),
                    None => ValueKind::Undefined.name().to_string(),
                };
                Validation::Failure(Issues::single(
                    Issue::new(path.clone(), IssueCode::InvalidLiteral, message)
                        .with_expected(self.value.to_string())
                        .with_received(received),
                ))
            }
        }
    }

    fn type_name(&self) -> &'static str {
        "literal"
    }
}

/// Accepts one of a fixed, non-empty list of strings.
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let sort = v::enum_(["asc", "desc"]).unwrap();
///
/// let err = sort.parse(&json!("up")).unwrap_err();
/// assert_eq!(
///     err.first().message,
///     "Invalid enum value. Expected 'asc' | 'desc', received 'up'"
/// );
///
/// assert!(v::enum_(Vec::<String>::new()).is_err());
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    options: Vec<String>,
    message: Option<String>,
}

impl EnumSchema {
    pub fn new<I, S>(options: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(BuildError::EmptyEnum);
        }
        Ok(Self {
            options,
            message: None,
        })
    }

    /// The allowed values, in declaration order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn expected(&self) -> String {
        self.options
            .iter()
            .map(|o| format!("'{}'", o))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl SchemaLike for EnumSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        if let Some(value @ Value::String(s)) = input {
            if self.options.iter().any(|o| o == s) {
                return Validation::Success(Some(value.clone()));
            }
        }

        let received = match input {
            Some(Value::String(s)) => format!("'{}'", s),
            Some(value) => value.to_string(),
            None => ValueKind::Undefined.name().to_string(),
        };
        let expected = self.expected();
        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "Invalid enum value. Expected {}, received {}",
                expected, received
            )
        });

        Validation::Failure(Issues::single(
            Issue::new(path.clone(), IssueCode::InvalidEnumValue, message)
                .with_expected(expected)
                .with_received(received),
        ))
    }

    fn type_name(&self) -> &'static str {
        "enum"
    }
}

/// Accepts only `null`.
#[derive(Clone, Copy, Default)]
pub struct NullSchema;

impl SchemaLike for NullSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            Some(Value::Null) => Validation::Success(Some(Value::Null)),
            _ => invalid_type(path, "null", input, None),
        }
    }

    fn type_name(&self) -> &'static str {
        "null"
    }
}

/// Accepts only an absent value.
#[derive(Clone, Copy, Default)]
pub struct UndefinedSchema;

impl SchemaLike for UndefinedSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            None => Validation::Success(None),
            Some(_) => invalid_type(path, "undefined", input, None),
        }
    }

    fn type_name(&self) -> &'static str {
        "undefined"
    }
}

/// Accepts only an absent value; used for handlers that return nothing.
#[derive(Clone, Copy, Default)]
pub struct VoidSchema;

impl SchemaLike for VoidSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            None => Validation::Success(None),
            Some(_) => invalid_type(path, "void", input, None),
        }
    }

    fn type_name(&self) -> &'static str {
        "void"
    }
}

/// Accepts anything, absent included, and returns it unchanged.
#[derive(Clone, Copy, Default)]
pub struct AnySchema;

impl SchemaLike for AnySchema {
    fn validate(
        &self,
        input: Option<&Value>,
        _path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        Validation::Success(input.cloned())
    }

    fn type_name(&self) -> &'static str {
        "any"
    }
}

/// Like [`AnySchema`]; the name documents that the value is still to be
/// narrowed by the caller.
#[derive(Clone, Copy, Default)]
pub struct UnknownSchema;

impl SchemaLike for UnknownSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        _path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        Validation::Success(input.cloned())
    }

    fn type_name(&self) -> &'static str {
        "unknown"
    }
}
