//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the one capability every schema provides: validate an
//! input at a path. [`SchemaExt`] layers the public entry points (`parse`,
//! `safe_parse`, `parse_as`) and the combinator chain on top of it for every
//! schema, including type-erased ones.

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Error, Issue, IssueCode, Issues, ValidationError};
use crate::path::IssuePath;
use crate::validation::{guard, ParseResult};

use super::combinators::{Nullable, Optional, WithDefault};
use super::effects::{Refined, Transformed};

/// A shareable, type-erased schema.
///
/// Children are held behind `Arc` so one schema can be reused by many parents
/// and structural operations can copy a shape without rebuilding it.
pub type BoxedSchema = Arc<dyn SchemaLike>;

/// A schema that can validate decoded input.
///
/// `input` is `None` when the value is absent (a missing object field). The
/// success value is `None` when the parse produced no value, in which case an
/// enclosing object omits the field.
///
/// Implementations must not hold per-call mutable state: the `Send + Sync`
/// bounds let one schema serve many threads at once.
///
/// # Example
///
/// ```rust
/// use sift::{v, IssuePath, SchemaLike};
/// use serde_json::json;
///
/// let schema = v::number().int();
///
/// let result = schema.validate(Some(&json!(4)), &IssuePath::root());
/// assert!(result.is_success());
///
/// let result = schema.validate(None, &IssuePath::root());
/// assert!(result.is_failure());
/// ```
pub trait SchemaLike: Send + Sync {
    /// Validates `input` located at `path`, accumulating every issue found.
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues>;

    /// A short label for the schema kind, used in logs.
    fn type_name(&self) -> &'static str;
}

impl<S: SchemaLike + ?Sized> SchemaLike for Arc<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        (**self).validate(input, path)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<S: SchemaLike + ?Sized> SchemaLike for Box<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        (**self).validate(input, path)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Entry points and combinators available on every schema.
///
/// # Example
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let port = v::string()
///     .regex(r"^\d+$")
///     .unwrap()
///     .transform(|s| {
///         s.as_str()
///             .unwrap_or_default()
///             .parse::<u16>()
///             .map(serde_json::Value::from)
///     })
///     .default(8080);
///
/// assert_eq!(port.parse(&json!("443")).unwrap(), json!(443));
/// assert_eq!(port.parse_input(None).unwrap(), Some(json!(8080)));
/// assert!(port.parse(&json!("70000")).is_err());
/// ```
pub trait SchemaExt: SchemaLike {
    /// Validates `data`, returning the parsed value or every issue found.
    ///
    /// An undefined result at the root is returned as `null`; use
    /// [`SchemaExt::parse_input`] to observe it. Panics raised outside a
    /// refinement or transform propagate to the caller.
    fn parse(&self, data: &Value) -> Result<Value, ValidationError> {
        self.parse_input(Some(data))
            .map(|value| value.unwrap_or(Value::Null))
    }

    /// Validates a possibly absent input.
    fn parse_input(&self, input: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        tracing::trace!(schema = self.type_name(), "parsing input");
        match self.validate(input, &IssuePath::root()) {
            Validation::Success(value) => Ok(value),
            Validation::Failure(issues) => {
                tracing::debug!(
                    schema = self.type_name(),
                    issues = issues.len(),
                    "input failed validation"
                );
                Err(ValidationError::new(issues))
            }
        }
    }

    /// Validates `data` without ever panicking or returning `Err`.
    ///
    /// A panic escaping validation is reported as one `unknown_error` issue
    /// at the root path.
    fn safe_parse(&self, data: &Value) -> ParseResult {
        match guard(|| self.parse(data)) {
            Ok(result) => result.into(),
            Err(panic) => {
                tracing::warn!(
                    schema = self.type_name(),
                    panic = %panic,
                    "panic trapped during validation"
                );
                ParseResult::Failure(ValidationError::new(Issues::single(Issue::new(
                    IssuePath::root(),
                    IssueCode::UnknownError,
                    format!("An unknown error occurred: {}", panic),
                ))))
            }
        }
    }

    /// Validates `data` and deserializes the output into `T`.
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Query {
    ///     page: u32,
    ///     sort: String,
    /// }
    ///
    /// let schema = v::object()
    ///     .field("page", v::number().int().positive().default(1))
    ///     .field("sort", v::enum_(["asc", "desc"]).unwrap().default("asc"));
    ///
    /// let query: Query = schema.parse_as(&json!({"sort": "desc"})).unwrap();
    /// assert_eq!(query.page, 1);
    /// assert_eq!(query.sort, "desc");
    /// ```
    fn parse_as<T: DeserializeOwned>(&self, data: &Value) -> Result<T, Error> {
        let value = self.parse(data)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Accepts an absent value, skipping this schema for it.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    /// Accepts `null`, skipping this schema for it.
    fn nullable(self) -> Nullable<Self>
    where
        Self: Sized,
    {
        Nullable::new(self)
    }

    /// Substitutes `value` for an absent input. The default is not validated.
    fn default(self, value: impl Into<Value>) -> WithDefault<Self>
    where
        Self: Sized,
    {
        WithDefault::new(self, value.into())
    }

    /// Adds a predicate that must hold for the parsed value.
    ///
    /// A false predicate yields one `custom` issue carrying `message`.
    /// Refinements chain in order and stop at the first failure.
    fn refine<F>(self, predicate: F, message: impl Into<String>) -> Refined<Self>
    where
        Self: Sized,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        Refined::new(self, move |value| {
            if predicate(value) {
                Ok(())
            } else {
                Err(message.clone())
            }
        })
    }

    /// Like [`SchemaExt::refine`], with the check choosing its own message.
    fn refine_with<F>(self, check: F) -> Refined<Self>
    where
        Self: Sized,
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Refined::new(self, check)
    }

    /// Maps the parsed value. An `Err` becomes one `custom` issue.
    fn transform<F, E>(self, mapper: F) -> Transformed<Self>
    where
        Self: Sized,
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        Transformed::new(self, move |value| mapper(value).map_err(|e| e.to_string()))
    }

    /// Erases the concrete type so the schema can be shared.
    fn boxed(self) -> BoxedSchema
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<S: SchemaLike + ?Sized> SchemaExt for S {}
