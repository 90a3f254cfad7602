//! Schema definitions for validation.
//!
//! This module provides the schema types and the combinators that wrap them.
//! Each schema validates a value and accumulates every issue it finds rather
//! than stopping at the first one; composites (arrays, objects) do the same
//! across their children.
//!
//! Schemas are usually built through the [`v`](crate::v) factory functions.
//!
//! # Example
//!
//! ```rust
//! use sift::{v, IssuePath, SchemaLike};
//! use serde_json::json;
//!
//! let schema = v::string().min(1).max(100);
//!
//! let result = schema.validate(Some(&json!("hello")), &IssuePath::root());
//! assert!(result.is_success());
//! ```

mod array;
mod combinators;
mod effects;
mod kind;
mod number;
mod object;
mod primitive;
mod string;
mod traits;
mod union;

pub use array::ArraySchema;
pub use combinators::{Nullable, Optional, WithDefault};
pub use effects::{Refined, Transformed};
pub use kind::ValueKind;
pub use number::{NumberSchema, NumericBound};
pub use object::{ObjectSchema, UnknownKeys};
pub use primitive::{
    AnySchema, BooleanSchema, EnumSchema, LiteralSchema, NullSchema, UndefinedSchema,
    UnknownSchema, VoidSchema,
};
pub use string::StringSchema;
pub use traits::{BoxedSchema, SchemaExt, SchemaLike};
pub use union::UnionSchema;

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StringSchema>();
    assert_send_sync::<NumberSchema>();
    assert_send_sync::<ObjectSchema>();
    assert_send_sync::<UnionSchema>();
    assert_send_sync::<ArraySchema<BoxedSchema>>();
    assert_send_sync::<Refined<BoxedSchema>>();
    assert_send_sync::<Transformed<BoxedSchema>>();
};
