//! Rendering issues for user-facing display.
//!
//! [`ErrorTree`] nests issue messages along their paths so the result mirrors
//! the shape of the validated input; [`FlattenedErrors`] groups them into
//! form-level and per-field lists.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::issue::Issue;
use crate::path::PathSegment;

/// A tree of error messages keyed by path segment.
///
/// Every node carries its own `_errors` list (possibly empty) and the child
/// nodes for deeper segments, in the order they were first touched. Array
/// indices become decimal string keys.
///
/// Serializes to the conventional shape:
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::object()
///     .field("name", v::string().min(2))
///     .field("tags", v::array(v::string()));
///
/// let err = schema.parse(&json!({"name": "J", "tags": ["ok", 7]})).unwrap_err();
/// assert_eq!(
///     serde_json::to_value(err.format()).unwrap(),
///     json!({
///         "_errors": [],
///         "name": {"_errors": ["String must contain at least 2 character(s)"]},
///         "tags": {"_errors": [], "1": {"_errors": ["Expected string, received number"]}}
///     })
/// );
/// ```
///
/// A field literally named `_errors` shares its JSON key with the node's own
/// list, and the serialized form keeps only the child. Read such trees
/// through [`ErrorTree::errors`] and [`ErrorTree::get`], which keep the two
/// apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    errors: Vec<String>,
    children: IndexMap<String, ErrorTree>,
}

impl ErrorTree {
    /// Builds a tree from issues, preserving their order within each node.
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut root = ErrorTree::default();
        for issue in issues {
            let node = issue
                .path
                .segments()
                .iter()
                .fold(&mut root, |node, segment| {
                    node.children.entry(segment_key(segment)).or_default()
                });
            node.errors.push(issue.message.clone());
        }
        root
    }

    /// Messages attached directly to this node.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The child node for a key or index, if any issue lies beneath it.
    pub fn get(&self, segment: impl Into<PathSegment>) -> Option<&ErrorTree> {
        self.children.get(&segment_key(&segment.into()))
    }

    /// Child keys in first-touched order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// True when neither this node nor any descendant holds a message.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.children.values().all(ErrorTree::is_empty)
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
        map.serialize_entry("_errors", &self.errors)?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

fn segment_key(segment: &PathSegment) -> String {
    match segment {
        PathSegment::Key(name) => name.clone(),
        PathSegment::Index(idx) => idx.to_string(),
    }
}

/// Issue messages split into root-level and per-field lists.
///
/// Issues with an empty path land in `form_errors`; every other issue is
/// grouped under the first segment of its path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedErrors {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl FlattenedErrors {
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut flattened = FlattenedErrors::default();
        for issue in issues {
            match issue.path.first() {
                None => flattened.form_errors.push(issue.message.clone()),
                Some(segment) => flattened
                    .field_errors
                    .entry(segment_key(segment))
                    .or_default()
                    .push(issue.message.clone()),
            }
        }
        flattened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::path::IssuePath;
    use serde_json::json;

    fn issue(path: IssuePath, message: &str) -> Issue {
        Issue::new(path, IssueCode::Custom, message)
    }

    #[test]
    fn test_root_issue_goes_to_root_errors() {
        let issues = vec![issue(IssuePath::root(), "bad body")];
        let tree = ErrorTree::from_issues(&issues);
        assert_eq!(tree.errors(), ["bad body".to_string()]);
        assert_eq!(tree.keys().count(), 0);
    }

    #[test]
    fn test_nested_paths_create_intermediate_nodes() {
        let issues = vec![
            issue(IssuePath::root().key("user").key("email"), "Invalid email"),
            issue(IssuePath::root().key("user").key("email"), "too long"),
            issue(IssuePath::root().key("items").index(3), "Required"),
        ];
        let tree = ErrorTree::from_issues(&issues);

        let user = tree.get("user").unwrap();
        assert!(user.errors().is_empty());
        assert_eq!(
            user.get("email").unwrap().errors(),
            ["Invalid email".to_string(), "too long".to_string()]
        );
        assert_eq!(
            tree.get("items").unwrap().get(3usize).unwrap().errors(),
            ["Required".to_string()]
        );
        assert!(tree.get("missing").is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let issues = vec![
            issue(IssuePath::root(), "root problem"),
            issue(IssuePath::root().key("a"), "a problem"),
        ];
        let tree = ErrorTree::from_issues(&issues);
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"_errors": ["root problem"], "a": {"_errors": ["a problem"]}})
        );
    }

    #[test]
    fn test_empty_tree() {
        let tree = ErrorTree::from_issues(std::iter::empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_flatten_groups_by_first_segment() {
        let issues = vec![
            issue(IssuePath::root(), "form"),
            issue(IssuePath::root().key("address").key("zip"), "zip"),
            issue(IssuePath::root().key("address").key("city"), "city"),
            issue(IssuePath::root().key("name"), "name"),
        ];
        let flat = FlattenedErrors::from_issues(&issues);
        assert_eq!(flat.form_errors, vec!["form".to_string()]);
        assert_eq!(
            flat.field_errors.get("address").unwrap(),
            &vec!["zip".to_string(), "city".to_string()]
        );
        assert_eq!(
            serde_json::to_value(&flat).unwrap(),
            json!({
                "formErrors": ["form"],
                "fieldErrors": {"address": ["zip", "city"], "name": ["name"]}
            })
        );
    }

    #[test]
    fn test_field_named_errors_stays_separate_in_tree() {
        let issues = vec![
            issue(IssuePath::root(), "Unrecognized key: 'x'"),
            issue(IssuePath::root().key("_errors"), "Expected string, received number"),
        ];
        let tree = ErrorTree::from_issues(&issues);
        assert_eq!(tree.errors(), ["Unrecognized key: 'x'".to_string()]);
        assert_eq!(
            tree.get("_errors").unwrap().errors(),
            ["Expected string, received number".to_string()]
        );
    }
}
