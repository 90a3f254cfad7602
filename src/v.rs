//! Factory functions, one per schema kind.
//!
//! This is the usual way to build schemas:
//!
//! ```rust
//! use sift::{v, SchemaExt};
//! use serde_json::json;
//!
//! let signup = v::object()
//!     .field("email", v::string().email())
//!     .field("password", v::string().min(8))
//!     .field("plan", v::enum_(["free", "pro"]).unwrap().default("free"))
//!     .field("referrer", v::string().url().optional());
//!
//! let parsed = signup
//!     .parse(&json!({"email": "jo@example.com", "password": "correct horse"}))
//!     .unwrap();
//! assert_eq!(parsed["plan"], json!("free"));
//! ```

use serde_json::Value;

use crate::error::BuildError;
use crate::schema::{
    AnySchema, ArraySchema, BooleanSchema, BoxedSchema, EnumSchema, LiteralSchema, NullSchema,
    NumberSchema, ObjectSchema, SchemaLike, StringSchema, UndefinedSchema, UnionSchema,
    UnknownSchema, VoidSchema,
};

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// An array whose elements all satisfy `element`.
pub fn array<S: SchemaLike>(element: S) -> ArraySchema<S> {
    ArraySchema::new(element)
}

/// An object with no declared fields yet; add them with
/// [`ObjectSchema::field`].
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

/// A union of type-erased alternatives, tried in order.
pub fn union<I>(options: I) -> UnionSchema
where
    I: IntoIterator<Item = BoxedSchema>,
{
    UnionSchema::new(options)
}

/// Exactly `value`, which must be a string, number, boolean or null.
pub fn literal(value: impl Into<Value>) -> Result<LiteralSchema, BuildError> {
    LiteralSchema::new(value)
}

/// One of `values`, which must not be empty.
pub fn enum_<I, S>(values: I) -> Result<EnumSchema, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema::new(values)
}

pub fn any() -> AnySchema {
    AnySchema
}

pub fn unknown() -> UnknownSchema {
    UnknownSchema
}

pub fn void() -> VoidSchema {
    VoidSchema
}

pub fn null() -> NullSchema {
    NullSchema
}

pub fn undefined() -> UndefinedSchema {
    UndefinedSchema
}
