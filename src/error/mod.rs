//! Issue, error and formatting types.
//!
//! Validation failures are described by [`Issue`]s, accumulated into a
//! non-empty [`Issues`] collection, and surfaced to callers through
//! [`ValidationError`], which can be rendered as a nested [`ErrorTree`].

mod format;
mod issue;
mod validation_error;

pub use format::{ErrorTree, FlattenedErrors};
pub use issue::{Issue, IssueCode, Issues};
pub use validation_error::{BuildError, Error, ValidationError};
