//! Issue paths for locating values in nested input.
//!
//! An [`IssuePath`] is the sequence of object keys and array indices leading
//! from the root of the validated input to the value an issue is about. The
//! empty path denotes the root value itself.

use std::fmt::{self, Display};

use serde::Serialize;

/// One step into a nested value: an object key or an array index.
///
/// Serializes untagged, so a path becomes a JSON array such as
/// `["users", 0, "email"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object key (e.g. `email`).
    Key(String),
    /// A zero-based array index (e.g. `[3]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The location of a value inside the original input.
///
/// Paths are immutable: [`IssuePath::key`] and [`IssuePath::index`] return a
/// new path, so a parent schema can hand each child its own extended path
/// while keeping its own.
///
/// # Example
///
/// ```rust
/// use sift::IssuePath;
///
/// let path = IssuePath::root().key("users").index(0).key("email");
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// The empty path, pointing at the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from any sequence of segments.
    ///
    /// ```rust
    /// use sift::{IssuePath, PathSegment};
    ///
    /// let path = IssuePath::from_segments([PathSegment::key("tags"), PathSegment::index(2)]);
    /// assert_eq!(path.to_string(), "tags[2]");
    /// ```
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path extended by an object key.
    pub fn key(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Key(name.into()))
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, idx: usize) -> Self {
        self.push(PathSegment::Index(idx))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The first segment, used when grouping issues per top-level field.
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_is_empty() {
        let path = IssuePath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert!(path.first().is_none());
    }

    #[test]
    fn test_mixed_display() {
        let path = IssuePath::root()
            .key("body")
            .key("items")
            .index(4)
            .key("sku");
        assert_eq!(path.to_string(), "body.items[4].sku");
    }

    #[test]
    fn test_leading_index() {
        let path = IssuePath::root().index(0).key("name");
        assert_eq!(path.to_string(), "[0].name");
    }

    #[test]
    fn test_extension_leaves_parent_untouched() {
        let base = IssuePath::root().key("rows");
        let first = base.index(0);
        let second = base.index(1);

        assert_eq!(base.to_string(), "rows");
        assert_eq!(first.to_string(), "rows[0]");
        assert_eq!(second.to_string(), "rows[1]");
    }

    #[test]
    fn test_serializes_as_array() {
        let path = IssuePath::root().key("users").index(2).key("email");
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            json!(["users", 2, "email"])
        );
    }

    #[test]
    fn test_from_segments_and_accessors() {
        let path = IssuePath::from_segments(["a", "b"]);
        assert_eq!(path.first(), Some(&PathSegment::key("a")));
        assert_eq!(path.last(), Some(&PathSegment::key("b")));
        assert_eq!(path.segments().len(), 2);
    }
}
