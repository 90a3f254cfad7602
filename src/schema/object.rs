//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects against
//! a declared shape, an unknown-key policy, and the structural operations
//! (`partial`, `pick`, `omit`, `extend`) that derive new shapes from old ones.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::combinators::Optional;
use super::kind::{finish, invalid_type};
use super::traits::{BoxedSchema, SchemaLike};

/// What to do with input keys the shape does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Report each one as an `unrecognized_keys` issue.
    Strict,
    /// Copy them to the output unvalidated.
    Passthrough,
}

/// A schema for validating JSON objects.
///
/// Every declared field is validated, in declaration order, with the path
/// extended by the field name; a missing field is validated as absent, so
/// it fails unless its schema is optional or has a default. Fields whose
/// schema produces no value are left out of the output.
///
/// Children are shared through `Arc`, so cloning a schema or deriving a new
/// one with [`ObjectSchema::pick`] and friends is cheap and never changes the
/// schema it came from.
///
/// # Example
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let user = v::object()
///     .field("name", v::string().min(1))
///     .field("email", v::string().email())
///     .strict();
///
/// let err = user
///     .parse(&json!({"name": "", "email": "x", "admin": true}))
///     .unwrap_err();
/// let paths: Vec<String> = err.issues().iter().map(|i| i.path.to_string()).collect();
/// assert_eq!(paths, vec!["name", "email", ""]);
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    shape: IndexMap<String, BoxedSchema>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates an object schema with no fields.
    pub fn new() -> Self {
        Self {
            shape: IndexMap::new(),
            unknown_keys: UnknownKeys::Strip,
            type_error_message: None,
        }
    }

    /// Declares a field. Redeclaring a name replaces its schema in place.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.shape.insert(name.into(), Arc::new(schema));
        self
    }

    /// Reports undeclared keys as issues.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Keeps undeclared keys in the output.
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Drops undeclared keys from the output. This is the default.
    pub fn strip(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strip;
        self
    }

    /// Replaces the type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Declared field names, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.shape.keys().map(String::as_str)
    }

    /// The declared fields and their schemas.
    pub fn shape(&self) -> &IndexMap<String, BoxedSchema> {
        &self.shape
    }

    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// A copy of this schema where every field may be absent.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let create = v::object()
    ///     .field("title", v::string().min(1))
    ///     .field("done", v::boolean());
    /// let update = create.partial();
    ///
    /// assert!(update.parse(&json!({"done": true})).is_ok());
    /// assert!(update.parse(&json!({"title": ""})).is_err());
    /// assert!(create.parse(&json!({"done": true})).is_err());
    /// ```
    pub fn partial(&self) -> Self {
        let shape = self
            .shape
            .iter()
            .map(|(name, schema)| {
                let optional: BoxedSchema = Arc::new(Optional::new(Arc::clone(schema)));
                (name.clone(), optional)
            })
            .collect();
        self.with_shape(shape)
    }

    /// A copy keeping only the named fields. Unknown names are ignored.
    pub fn pick<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let shape = self
            .shape
            .iter()
            .filter(|(name, _)| keys.iter().any(|k| k.as_ref() == name.as_str()))
            .map(|(name, schema)| (name.clone(), Arc::clone(schema)))
            .collect();
        self.with_shape(shape)
    }

    /// A copy without the named fields.
    pub fn omit<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut shape = self.shape.clone();
        for key in keys {
            shape.shift_remove(key.as_ref());
        }
        self.with_shape(shape)
    }

    /// A copy with `other`'s fields merged in.
    ///
    /// A field declared in both takes `other`'s schema and keeps its original
    /// position. The unknown-key policy and messages are this schema's.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let base = v::object().field("id", v::string()).field("name", v::string());
    /// let numbered = base.extend(&v::object().field("id", v::number()).field("tag", v::string()));
    ///
    /// assert_eq!(numbered.keys().collect::<Vec<_>>(), vec!["id", "name", "tag"]);
    /// assert!(numbered.parse(&json!({"id": 7, "name": "a", "tag": "b"})).is_ok());
    /// ```
    pub fn extend(&self, other: &ObjectSchema) -> Self {
        let mut shape = self.shape.clone();
        for (name, schema) in &other.shape {
            shape.insert(name.clone(), Arc::clone(schema));
        }
        self.with_shape(shape)
    }

    fn with_shape(&self, shape: IndexMap<String, BoxedSchema>) -> Self {
        Self {
            shape,
            unknown_keys: self.unknown_keys,
            type_error_message: self.type_error_message.clone(),
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let obj = match input {
            Some(Value::Object(obj)) => obj,
            _ => return invalid_type(path, "object", input, self.type_error_message.as_ref()),
        };

        let mut issues = Vec::new();
        let mut output = Map::new();

        for (name, schema) in &self.shape {
            match schema.validate(obj.get(name), &path.key(name.as_str())) {
                Validation::Success(Some(value)) => {
                    output.insert(name.clone(), value);
                }
                Validation::Success(None) => {}
                Validation::Failure(errors) => issues.extend(errors),
            }
        }

        let unknown = obj.iter().filter(|(key, _)| !self.shape.contains_key(*key));
        match self.unknown_keys {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => {
                for (key, value) in unknown {
                    output.insert(key.clone(), value.clone());
                }
            }
            UnknownKeys::Strict => {
                for (key, _) in unknown {
                    issues.push(
                        Issue::new(
                            path.clone(),
                            IssueCode::UnrecognizedKeys,
                            format!("Unrecognized key: '{}'", key),
                        )
                        .with_received(key.clone()),
                    );
                }
            }
        }

        finish(Some(Value::Object(output)), issues)
    }

    fn type_name(&self) -> &'static str {
        "object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn user() -> ObjectSchema {
        ObjectSchema::new()
            .field("name", StringSchema::new().min(2))
            .field("age", NumberSchema::new().int().min(18))
    }

    fn check(schema: &ObjectSchema, value: Value) -> Validation<Option<Value>, Issues> {
        schema.validate(Some(&value), &IssuePath::root())
    }

    #[test]
    fn test_valid_object() {
        let parsed = check(&user(), json!({"name": "Jo", "age": 30}))
            .into_result()
            .unwrap();
        assert_eq!(parsed, Some(json!({"name": "Jo", "age": 30})));
    }

    #[test]
    fn test_rejects_non_objects() {
        for value in [json!(null), json!([]), json!("{}")] {
            let issues = check(&user(), value).into_result().unwrap_err();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues.first().code, IssueCode::InvalidType);
        }
    }

    #[test]
    fn test_all_field_issues_in_declaration_order() {
        let issues = check(&user(), json!({"age": 15, "name": "J"}))
            .into_result()
            .unwrap_err();
        let paths: Vec<String> = issues.iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "age"]);
    }

    #[test]
    fn test_missing_field_is_required() {
        let issues = check(&user(), json!({"name": "Jo"})).into_result().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().message, "Required");
        assert_eq!(issues.first().path.to_string(), "age");
    }

    #[test]
    fn test_nested_paths() {
        let schema = ObjectSchema::new().field("owner", user());
        let issues = check(&schema, json!({"owner": {"name": "Jo", "age": "x"}}))
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().path.to_string(), "owner.age");
    }

    #[test]
    fn test_strip_is_default() {
        assert_eq!(user().unknown_keys(), UnknownKeys::Strip);
        let parsed = check(&user(), json!({"name": "Jo", "age": 30, "extra": 1}))
            .into_result()
            .unwrap();
        assert_eq!(parsed, Some(json!({"name": "Jo", "age": 30})));
    }

    #[test]
    fn test_strict_reports_each_key() {
        let issues = check(&user().strict(), json!({"name": "Jo", "age": 30, "a": 1, "b": 2}))
            .into_result()
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == IssueCode::UnrecognizedKeys));
        assert!(issues.iter().all(|i| i.path.is_root()));
        assert_eq!(issues.first().message, "Unrecognized key: 'a'");
        assert_eq!(issues.first().received.as_deref(), Some("a"));
    }

    #[test]
    fn test_passthrough_keeps_unknown_keys() {
        let parsed = check(
            &user().passthrough(),
            json!({"name": "Jo", "age": 30, "extra": [1]}),
        )
        .into_result()
        .unwrap();
        assert_eq!(parsed, Some(json!({"name": "Jo", "age": 30, "extra": [1]})));

        let stripped = user().passthrough().strip();
        assert_eq!(stripped.unknown_keys(), UnknownKeys::Strip);
    }

    #[test]
    fn test_absent_outputs_are_omitted() {
        let schema = ObjectSchema::new()
            .field("a", Optional::new(StringSchema::new()))
            .field("b", StringSchema::new());
        let parsed = check(&schema, json!({"b": "x"})).into_result().unwrap();
        assert_eq!(parsed, Some(json!({"b": "x"})));
    }

    #[test]
    fn test_pick_and_omit_leave_original() {
        let base = user();
        let picked = base.pick(["name", "missing"]);
        let omitted = base.omit(["name"]);

        assert_eq!(picked.keys().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(omitted.keys().collect::<Vec<_>>(), vec!["age"]);
        assert_eq!(base.keys().count(), 2);
        assert!(check(&picked, json!({"name": "Jo"})).is_success());
    }

    #[test]
    fn test_partial_shares_field_schemas() {
        let base = user();
        let partial = base.partial();
        assert!(check(&partial, json!({})).is_success());
        assert!(check(&partial, json!({"age": 3})).is_failure());
        assert!(check(&base, json!({})).is_failure());
    }

    #[test]
    fn test_extend_overrides_in_place() {
        let extended = user().extend(&ObjectSchema::new().field("name", NumberSchema::new()));
        assert_eq!(extended.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert!(check(&extended, json!({"name": 5, "age": 20})).is_success());
    }

    #[test]
    fn test_custom_type_message() {
        let issues = check(&user().error("body must be an object"), json!(1))
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().message, "body must be an object");
    }
}
