//! Refinements and transforms.
//!
//! Both run user code after the inner schema has succeeded. A failing
//! callback, whether it returns an error or panics, is reported as a single
//! `custom` issue at the current path and never unwinds further.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;
use crate::validation::guard;

use super::traits::SchemaLike;

pub(crate) type CheckFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;
pub(crate) type MapFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// An inner schema plus one extra check on its output.
///
/// Chained refinements nest, so each runs only when the inner schema and
/// every earlier refinement passed:
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let password = v::string()
///     .min(8)
///     .refine(|v| v.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())), "needs a digit")
///     .refine(|v| v.as_str().is_some_and(|s| s.chars().any(|c| c.is_uppercase())), "needs an uppercase letter");
///
/// let err = password.parse(&json!("lowercase")).unwrap_err();
/// assert_eq!(err.len(), 1);
/// assert_eq!(err.first().message, "needs a digit");
/// ```
#[derive(Clone)]
pub struct Refined<S> {
    inner: S,
    check: CheckFn,
}

impl<S> Refined<S> {
    pub fn new<F>(inner: S, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            inner,
            check: Arc::new(check),
        }
    }
}

impl<S: SchemaLike> SchemaLike for Refined<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let value = match self.inner.validate(input, path) {
            Validation::Success(Some(value)) => value,
            other => return other,
        };

        match guard(|| (self.check)(&value)) {
            Ok(Ok(())) => Validation::Success(Some(value)),
            Ok(Err(message)) => Validation::Failure(Issues::single(Issue::custom(
                path.clone(),
                message,
            ))),
            Err(panic) => {
                tracing::warn!(path = %path, panic = %panic, "refinement panicked");
                Validation::Failure(Issues::single(Issue::custom(path.clone(), panic)))
            }
        }
    }

    fn type_name(&self) -> &'static str {
        "refinement"
    }
}

/// An inner schema whose output is mapped to a new value.
///
/// The mapped value may have any kind, so this is the one place a parse can
/// change the type of what it produced.
#[derive(Clone)]
pub struct Transformed<S> {
    inner: S,
    mapper: MapFn,
}

impl<S> Transformed<S> {
    pub fn new<F>(inner: S, mapper: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            inner,
            mapper: Arc::new(mapper),
        }
    }
}

impl<S: SchemaLike> SchemaLike for Transformed<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let value = match self.inner.validate(input, path) {
            Validation::Success(Some(value)) => value,
            other => return other,
        };

        match guard(|| (self.mapper)(value)) {
            Ok(Ok(mapped)) => Validation::Success(Some(mapped)),
            Ok(Err(message)) => Validation::Failure(Issues::single(Issue::custom(
                path.clone(),
                message,
            ))),
            Err(panic) => {
                tracing::warn!(path = %path, panic = %panic, "transform panicked");
                Validation::Failure(Issues::single(Issue::custom(path.clone(), panic)))
            }
        }
    }

    fn type_name(&self) -> &'static str {
        "transform"
    }
}
