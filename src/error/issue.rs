//! The issue model.
//!
//! This module provides [`Issue`] for a single validation failure and
//! [`Issues`] for the non-empty, ordered set of failures a parse produced.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use stillwater::prelude::*;

use crate::path::IssuePath;

/// Machine-readable classification of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value has the wrong runtime kind, or is missing.
    InvalidType,
    /// A length, count or numeric lower bound was violated.
    TooSmall,
    /// A length, count or numeric upper bound was violated.
    TooBig,
    /// A string format check (regex, email, url, uuid, prefix, suffix) failed.
    InvalidString,
    InvalidLiteral,
    InvalidEnumValue,
    /// A strict object received a key it does not declare.
    UnrecognizedKeys,
    /// No union alternative accepted the value.
    InvalidUnion,
    /// A refinement or transform rejected the value.
    Custom,
    /// A panic escaped validation and was trapped by `safe_parse`.
    UnknownError,
}

impl IssueCode {
    /// The snake_case tag used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::InvalidString => "invalid_string",
            IssueCode::InvalidLiteral => "invalid_literal",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::Custom => "custom",
            IssueCode::UnknownError => "unknown_error",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure.
///
/// - **path**: where in the input the failure occurred (empty for the root)
/// - **message**: human-readable description
/// - **code**: machine-readable [`IssueCode`]
/// - **received** / **expected**: optional descriptors of what was found and
///   what the schema wanted
///
/// # Example
///
/// ```rust
/// use sift::{Issue, IssueCode, IssuePath};
///
/// let issue = Issue::new(IssuePath::root().key("age"), IssueCode::TooSmall, "too young")
///     .with_received("15")
///     .with_expected(">= 18");
///
/// assert_eq!(issue.to_string(), "age: too young (expected: >= 18) (received: 15)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub path: IssuePath,
    pub message: String,
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl Issue {
    /// Creates an issue with no received/expected descriptors.
    pub fn new(path: IssuePath, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code,
            received: None,
            expected: None,
        }
    }

    /// A `custom` issue, as produced by refinements and transforms.
    pub fn custom(path: IssuePath, message: impl Into<String>) -> Self {
        Self::new(path, IssueCode::Custom, message)
    }

    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref received) = self.received {
            write!(f, " (received: {})", received)?;
        }

        Ok(())
    }
}

impl std::error::Error for Issue {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty, ordered collection of issues.
///
/// Wraps a `NonEmptyVec<Issue>` so a failed parse always carries at least one
/// issue. Implements `Semigroup`, which is how sibling failures are merged
/// while preserving their order:
///
/// ```rust
/// use sift::{Issue, IssueCode, IssuePath, Issues};
/// use stillwater::prelude::*;
///
/// let name = Issues::single(Issue::new(IssuePath::root().key("name"), IssueCode::TooSmall, "short"));
/// let age = Issues::single(Issue::new(IssuePath::root().key("age"), IssueCode::TooSmall, "young"));
///
/// let all = name.combine(age);
/// assert_eq!(all.len(), 2);
/// assert_eq!(all.first().path.to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Wraps a vector of issues, or returns `None` when it is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// All issues located exactly at `path`.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// All issues with the given code.
    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl Serialize for Issues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
