//! Error types returned by the parse entry points.

use std::sync::OnceLock;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::format::{ErrorTree, FlattenedErrors};
use super::issue::{Issue, IssueCode, Issues};

/// The failure of one `parse` invocation.
///
/// Carries every issue the parse produced, in traversal order. The nested
/// [`ErrorTree`] is computed on first use of [`ValidationError::format`] and
/// cached.
///
/// # Example
///
/// ```rust
/// use sift::{v, IssueCode, SchemaExt};
/// use serde_json::json;
///
/// let err = v::string().min(2).parse(&json!("a")).unwrap_err();
/// assert_eq!(err.len(), 1);
/// assert_eq!(err.first().code, IssueCode::TooSmall);
/// assert!(err.first().path.is_root());
/// ```
#[derive(Debug, Error)]
#[error("{issues}")]
pub struct ValidationError {
    issues: Issues,
    tree: OnceLock<ErrorTree>,
}

impl ValidationError {
    pub fn new(issues: Issues) -> Self {
        Self {
            issues,
            tree: OnceLock::new(),
        }
    }

    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    pub fn into_issues(self) -> Issues {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &Issue {
        self.issues.first()
    }

    /// Issues with the given code, in order.
    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.issues.with_code(code)
    }

    /// The issues nested by path, mirroring the shape of the input.
    pub fn format(&self) -> &ErrorTree {
        self.tree
            .get_or_init(|| ErrorTree::from_issues(self.issues.iter()))
    }

    /// Root-level messages and per-field message lists.
    pub fn flatten(&self) -> FlattenedErrors {
        FlattenedErrors::from_issues(self.issues.iter())
    }
}

impl Clone for ValidationError {
    fn clone(&self) -> Self {
        Self::new(self.issues.clone())
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.issues == other.issues
    }
}

impl From<Issues> for ValidationError {
    fn from(issues: Issues) -> Self {
        Self::new(issues)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 1)?;
        state.serialize_field("issues", &self.issues)?;
        state.end()
    }
}

/// Errors from typed parsing with `parse_as`.
#[derive(Debug, Error)]
pub enum Error {
    /// The input did not satisfy the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The validated output could not be deserialized into the target type.
    #[error("validated output does not match target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors raised while building a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("enum schema requires at least one value")]
    EmptyEnum,

    #[error("literal schema requires a primitive value, got {0}")]
    NonPrimitiveLiteral(&'static str),
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::IssuePath;
    use serde_json::json;
    use stillwater::prelude::*;

    fn sample() -> ValidationError {
        let issues = Issues::single(Issue::new(
            IssuePath::root().key("a"),
            IssueCode::TooSmall,
            "a is short",
        ))
        .combine(Issues::single(Issue::new(
            IssuePath::root().key("b"),
            IssueCode::Custom,
            "b is wrong",
        )));
        ValidationError::new(issues)
    }

    #[test]
    fn test_format_is_cached() {
        let err = sample();
        let first = err.format() as *const ErrorTree;
        let second = err.format() as *const ErrorTree;
        assert_eq!(first, second);
        assert_eq!(err.format().get("a").unwrap().errors(), ["a is short".to_string()]);
    }

    #[test]
    fn test_display_lists_every_issue() {
        let text = sample().to_string();
        assert!(text.contains("a: a is short"));
        assert!(text.contains("b: b is wrong"));
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["issues"].as_array().unwrap().len(), 2);
        assert_eq!(value["issues"][1]["code"], json!("custom"));
    }

    #[test]
    fn test_clone_and_eq() {
        let err = sample();
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn test_error_wraps_validation() {
        let err: Error = sample().into();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("2 issue(s)"));
    }
}
