//! Presence combinators: optional, nullable and default.
//!
//! Each wraps an inner schema and decides, before delegating, whether the
//! input needs validating at all:
//! - [`Optional`]: an absent value is accepted as absent
//! - [`Nullable`]: `null` is accepted as `null`
//! - [`WithDefault`]: an absent value is replaced by a fixed default
//!
//! Optional and nullable are independent. A field that may be missing or
//! `null` needs both.
//!
//! # Example
//!
//! ```rust
//! use sift::{v, SchemaExt};
//! use serde_json::json;
//!
//! let schema = v::object()
//!     .field("nickname", v::string().optional())
//!     .field("bio", v::string().nullable())
//!     .field("role", v::string().default("member"));
//!
//! let parsed = schema.parse(&json!({"bio": null})).unwrap();
//! assert_eq!(parsed, json!({"bio": null, "role": "member"}));
//! ```

use serde_json::Value;
use stillwater::Validation;

use crate::error::Issues;
use crate::path::IssuePath;

use super::traits::SchemaLike;

/// Accepts an absent value without consulting the inner schema.
#[derive(Clone)]
pub struct Optional<S> {
    inner: S,
}

impl<S> Optional<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Removes the optional wrapper.
    pub fn unwrap(self) -> S {
        self.inner
    }
}

impl<S: SchemaLike> SchemaLike for Optional<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            None => Validation::Success(None),
            Some(_) => self.inner.validate(input, path),
        }
    }

    fn type_name(&self) -> &'static str {
        "optional"
    }
}

/// Accepts `null` without consulting the inner schema.
#[derive(Clone)]
pub struct Nullable<S> {
    inner: S,
}

impl<S> Nullable<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn unwrap(self) -> S {
        self.inner
    }
}

impl<S: SchemaLike> SchemaLike for Nullable<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            Some(Value::Null) => Validation::Success(Some(Value::Null)),
            _ => self.inner.validate(input, path),
        }
    }

    fn type_name(&self) -> &'static str {
        "nullable"
    }
}

/// Replaces an absent value with a default.
///
/// The default is returned as is: it is neither validated nor passed through
/// the inner schema's transforms.
#[derive(Clone)]
pub struct WithDefault<S> {
    inner: S,
    default: Value,
}

impl<S> WithDefault<S> {
    pub fn new(inner: S, default: Value) -> Self {
        Self { inner, default }
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Removes the default wrapper.
    pub fn remove_default(self) -> S {
        self.inner
    }
}

impl<S: SchemaLike> SchemaLike for WithDefault<S> {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        match input {
            None => Validation::Success(Some(self.default.clone())),
            Some(_) => self.inner.validate(input, path),
        }
    }

    fn type_name(&self) -> &'static str {
        "default"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn root() -> IssuePath {
        IssuePath::root()
    }

    #[test]
    fn test_optional_skips_inner_for_absent() {
        let schema = Optional::new(StringSchema::new().min(3));
        assert_eq!(schema.validate(None, &root()).into_result().unwrap(), None);
    }

    #[test]
    fn test_optional_delegates_for_present() {
        let schema = Optional::new(StringSchema::new().min(3));
        assert!(schema.validate(Some(&json!("abc")), &root()).is_success());
        assert!(schema.validate(Some(&json!("ab")), &root()).is_failure());
        // null is not absent
        assert!(schema.validate(Some(&json!(null)), &root()).is_failure());
    }

    #[test]
    fn test_nullable_accepts_null_only() {
        let schema = Nullable::new(NumberSchema::new());
        assert_eq!(
            schema.validate(Some(&json!(null)), &root()).into_result().unwrap(),
            Some(json!(null))
        );
        assert!(schema.validate(Some(&json!(2)), &root()).is_success());

        let issues = schema.validate(None, &root()).into_result().unwrap_err();
        assert_eq!(issues.first().code, IssueCode::InvalidType);
        assert_eq!(issues.first().message, "Required");
    }

    #[test]
    fn test_default_is_not_validated() {
        // A default violating the inner constraint is still returned.
        let schema = WithDefault::new(StringSchema::new().min(10), json!("short"));
        assert_eq!(
            schema.validate(None, &root()).into_result().unwrap(),
            Some(json!("short"))
        );
        assert!(schema.validate(Some(&json!("short")), &root()).is_failure());
        assert_eq!(schema.default_value(), &json!("short"));
    }

    #[test]
    fn test_default_does_not_replace_null() {
        let schema = WithDefault::new(StringSchema::new(), json!("x"));
        assert!(schema.validate(Some(&json!(null)), &root()).is_failure());
    }

    #[test]
    fn test_unwrap_accessors() {
        let inner = Optional::new(StringSchema::new()).unwrap();
        assert!(inner.validate(None, &root()).is_failure());

        let inner = WithDefault::new(StringSchema::new(), json!("x")).remove_default();
        assert!(inner.validate(None, &root()).is_failure());
    }
}
