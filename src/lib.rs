//! # Sift
//!
//! A combinator-based validation library that parses untrusted, already
//! decoded input (`serde_json::Value`) into constrained values, or reports
//! every problem it found as a path-addressed issue.
//!
//! ## Overview
//!
//! Schemas are built once, from the [`v`] factory functions and their
//! builder methods, and are immutable and thread-safe afterwards. Parsing
//! never stops at the first problem: objects validate every field and arrays
//! every element, so one round trip tells the caller everything that needs
//! fixing. Accumulation is built on stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`SchemaLike`]: the validation capability every schema has
//! - [`SchemaExt`]: `parse`, `safe_parse`, `parse_as` and the combinators
//!   (`optional`, `nullable`, `default`, `refine`, `transform`)
//! - [`Issue`]: one failure, with its [`IssuePath`], message and [`IssueCode`]
//! - [`ValidationError`]: all issues of a failed parse, formattable as an
//!   [`ErrorTree`] or [`FlattenedErrors`]
//! - [`SchemaRegistry`]: named schemas shared across threads
//!
//! ## Example
//!
//! ```rust
//! use sift::{v, SchemaExt};
//! use serde_json::json;
//!
//! let schema = v::object()
//!     .field("name", v::string().min(2))
//!     .field("age", v::number().int().min(18));
//!
//! let err = schema.parse(&json!({"name": "J", "age": 15})).unwrap_err();
//! assert_eq!(err.len(), 2);
//!
//! let tree = serde_json::to_value(err.format()).unwrap();
//! assert_eq!(
//!     tree,
//!     json!({
//!         "_errors": [],
//!         "name": {"_errors": ["String must contain at least 2 character(s)"]},
//!         "age": {"_errors": ["Number must be greater than or equal to 18"]}
//!     })
//! );
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod v;
pub mod validation;

pub use error::{
    BuildError, Error, ErrorTree, FlattenedErrors, Issue, IssueCode, Issues, ValidationError,
};
pub use path::{IssuePath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    AnySchema, ArraySchema, BooleanSchema, BoxedSchema, EnumSchema, LiteralSchema, NullSchema,
    Nullable, NumberSchema, NumericBound, ObjectSchema, Optional, Refined, SchemaExt, SchemaLike,
    StringSchema, Transformed, UndefinedSchema, UnionSchema, UnknownKeys, UnknownSchema,
    ValueKind, VoidSchema, WithDefault,
};
pub use validation::ParseResult;

/// Type alias for validation results using Issues
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
