//! Schema registry for named schema storage and lookup.
//!
//! This module provides the [`SchemaRegistry`] type. The request layer
//! publishes one schema per route or payload name at startup and validates
//! incoming bodies by name afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::{BoxedSchema, SchemaExt, SchemaLike};
use crate::validation::ParseResult;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, BoxedSchema>>>;

/// A thread-safe registry of named schemas.
///
/// # Thread Safety
///
/// The map sits behind a `parking_lot::RwLock`:
/// - lookups and validations take the read lock only long enough to clone the
///   schema's `Arc`, so validation itself runs without holding any lock
/// - registrations take the write lock
///
/// Clones share the same map.
///
/// # Example
///
/// ```rust
/// use sift::{v, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register(
///         "CreateUser",
///         v::object()
///             .field("name", v::string().min(1))
///             .field("age", v::number().int().positive()),
///     )
///     .unwrap();
///
/// let result = registry
///     .safe_parse("CreateUser", &json!({"name": "Alice", "age": 30}))
///     .unwrap();
/// assert!(result.is_success());
/// ```
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken;
    /// the existing schema is left in place.
    ///
    /// ```rust
    /// use sift::{v, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Email", v::string().email()).unwrap();
    /// assert!(registry.register("Email", v::string()).is_err());
    /// ```
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        self.register_boxed(name, Arc::new(schema))
    }

    /// Registers an already shared schema.
    pub fn register_boxed(
        &self,
        name: impl Into<String>,
        schema: BoxedSchema,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, schema = schema.type_name(), "registered schema");
        schemas.insert(name, schema);
        Ok(())
    }

    /// Retrieves a schema by name.
    pub fn get(&self, name: &str) -> Option<BoxedSchema> {
        self.schemas.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Parses `value` with the named schema.
    ///
    /// # Errors
    ///
    /// `RegistryError::NotFound` for an unknown name, and
    /// `RegistryError::Validation` when the value fails the schema.
    pub fn parse(&self, name: &str, value: &Value) -> Result<Value, RegistryError> {
        Ok(self.lookup(name)?.parse(value)?)
    }

    /// Parses `value` with the named schema without failing on invalid input.
    ///
    /// # Errors
    ///
    /// Only `RegistryError::NotFound`.
    pub fn safe_parse(&self, name: &str, value: &Value) -> Result<ParseResult, RegistryError> {
        Ok(self.lookup(name)?.safe_parse(value))
    }

    /// Parses many values with the named schema in parallel.
    ///
    /// Results are in input order.
    ///
    /// ```rust
    /// use sift::{v, SchemaRegistry};
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Port", v::number().int().range(1.0..=65535.0)).unwrap();
    ///
    /// let results = registry
    ///     .safe_parse_batch("Port", &[json!(80), json!(0), json!(443)])
    ///     .unwrap();
    /// let ok: Vec<bool> = results.iter().map(|r| r.is_success()).collect();
    /// assert_eq!(ok, vec![true, false, true]);
    /// ```
    pub fn safe_parse_batch(
        &self,
        name: &str,
        values: &[Value],
    ) -> Result<Vec<ParseResult>, RegistryError> {
        let schema = self.lookup(name)?;
        tracing::trace!(name = %name, count = values.len(), "parsing batch");
        Ok(values
            .par_iter()
            .map(|value| schema.safe_parse(value))
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<BoxedSchema, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to use a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    NotFound(String),

    /// The value failed the named schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
