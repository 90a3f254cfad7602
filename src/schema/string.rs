//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length bounds, regex patterns and the fixed email/url/uuid formats.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::kind::{finish, invalid_type};
use super::traits::SchemaLike;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000)$",
    )
    .expect("uuid regex is valid")
});

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    Min {
        min: usize,
        message: Option<String>,
    },
    Max {
        max: usize,
        message: Option<String>,
    },
    Length {
        len: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    Url {
        message: Option<String>,
    },
    Uuid {
        message: Option<String>,
    },
    StartsWith {
        prefix: String,
        message: Option<String>,
    },
    EndsWith {
        suffix: String,
        message: Option<String>,
    },
}

impl StringConstraint {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            StringConstraint::Min { message, .. }
            | StringConstraint::Max { message, .. }
            | StringConstraint::Length { message, .. }
            | StringConstraint::Pattern { message, .. }
            | StringConstraint::Email { message }
            | StringConstraint::Url { message }
            | StringConstraint::Uuid { message }
            | StringConstraint::StartsWith { message, .. }
            | StringConstraint::EndsWith { message, .. } => message,
        }
    }
}

/// A schema for validating string values.
///
/// The type check runs first: a non-string produces exactly one
/// `invalid_type` issue and no constraint is evaluated. Otherwise every
/// constraint is checked independently and each violation is reported.
///
/// # Example
///
/// ```rust
/// use sift::{v, IssueCode, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::string().min(5).email();
///
/// let err = schema.parse(&json!("a@b")).unwrap_err();
/// let codes: Vec<IssueCode> = err.issues().iter().map(|i| i.code).collect();
/// assert_eq!(codes, vec![IssueCode::TooSmall, IssueCode::InvalidString]);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// At least `min` characters (Unicode scalar values).
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// assert!(v::string().min(2).parse(&json!("ab")).is_ok());
    /// assert!(v::string().min(2).parse(&json!("a")).is_err());
    /// ```
    pub fn min(self, min: usize) -> Self {
        self.push(StringConstraint::Min { min, message: None })
    }

    /// At most `max` characters.
    pub fn max(self, max: usize) -> Self {
        self.push(StringConstraint::Max { max, message: None })
    }

    /// Exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.push(StringConstraint::Length { len, message: None })
    }

    /// At least one character.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Must match `pattern`. Fails to build if the pattern does not compile.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let slug = v::string().regex(r"^[a-z0-9-]+$").unwrap();
    /// assert!(slug.parse(&json!("hello-world")).is_ok());
    /// assert!(slug.parse(&json!("Hello World")).is_err());
    ///
    /// assert!(v::string().regex(r"[unclosed").is_err());
    /// ```
    pub fn regex(self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(self.push(StringConstraint::Pattern {
            regex,
            message: None,
        }))
    }

    /// A `local@domain.tld` shaped address.
    pub fn email(self) -> Self {
        self.push(StringConstraint::Email { message: None })
    }

    /// Anything the WHATWG URL parser accepts as an absolute URL.
    pub fn url(self) -> Self {
        self.push(StringConstraint::Url { message: None })
    }

    /// An RFC 4122 UUID (versions 1 to 5) or the nil UUID, any letter case.
    pub fn uuid(self) -> Self {
        self.push(StringConstraint::Uuid { message: None })
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.push(StringConstraint::StartsWith {
            prefix: prefix.into(),
            message: None,
        })
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.push(StringConstraint::EndsWith {
            suffix: suffix.into(),
            message: None,
        })
    }

    /// Sets the message of the most recent constraint.
    ///
    /// Before any constraint is added this sets the type error message.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let schema = v::string().error("name must be text").min(2).error("name is too short");
    ///
    /// let err = schema.parse(&json!(1)).unwrap_err();
    /// assert_eq!(err.first().message, "name must be text");
    ///
    /// let err = schema.parse(&json!("a")).unwrap_err();
    /// assert_eq!(err.first().message, "name is too short");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(last) => *last.message_mut() = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn push(mut self, constraint: StringConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let s = match input {
            Some(Value::String(s)) => s,
            _ => {
                return invalid_type(path, "string", input, self.type_error_message.as_ref())
            }
        };

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        finish(Some(Value::String(s.clone())), issues)
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &StringConstraint, value: &str, path: &IssuePath) -> Option<Issue> {
    let len = || value.chars().count();
    let issue = |code: IssueCode, message: &Option<String>, default: String| {
        Issue::new(path.clone(), code, message.clone().unwrap_or(default))
    };

    match constraint {
        StringConstraint::Min { min, message } => (len() < *min).then(|| {
            issue(
                IssueCode::TooSmall,
                message,
                format!("String must contain at least {} character(s)", min),
            )
            .with_expected(format!("at least {} characters", min))
            .with_received(format!("{} characters", len()))
        }),
        StringConstraint::Max { max, message } => (len() > *max).then(|| {
            issue(
                IssueCode::TooBig,
                message,
                format!("String must contain at most {} character(s)", max),
            )
            .with_expected(format!("at most {} characters", max))
            .with_received(format!("{} characters", len()))
        }),
        StringConstraint::Length { len: exact, message } => {
            let actual = len();
            let code = if actual < *exact {
                IssueCode::TooSmall
            } else if actual > *exact {
                IssueCode::TooBig
            } else {
                return None;
            };
            Some(
                issue(
                    code,
                    message,
                    format!("String must contain exactly {} character(s)", exact),
                )
                .with_expected(format!("exactly {} characters", exact))
                .with_received(format!("{} characters", actual)),
            )
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            issue(IssueCode::InvalidString, message, "Invalid".to_string())
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_received(value.to_string())
        }),
        StringConstraint::Email { message } => (!EMAIL_REGEX.is_match(value)).then(|| {
            issue(IssueCode::InvalidString, message, "Invalid email".to_string())
                .with_expected("email")
        }),
        StringConstraint::Url { message } => url::Url::parse(value).is_err().then(|| {
            issue(IssueCode::InvalidString, message, "Invalid url".to_string())
                .with_expected("url")
        }),
        StringConstraint::Uuid { message } => (!UUID_REGEX.is_match(value)).then(|| {
            issue(IssueCode::InvalidString, message, "Invalid uuid".to_string())
                .with_expected("uuid")
        }),
        StringConstraint::StartsWith { prefix, message } => (!value.starts_with(prefix.as_str()))
            .then(|| {
                issue(
                    IssueCode::InvalidString,
                    message,
                    format!("Invalid input: must start with \"{}\"", prefix),
                )
                .with_expected(format!("prefix '{}'", prefix))
            }),
        StringConstraint::EndsWith { suffix, message } => (!value.ends_with(suffix.as_str()))
            .then(|| {
                issue(
                    IssueCode::InvalidString,
                    message,
                    format!("Invalid input: must end with \"{}\"", suffix),
                )
                .with_expected(format!("suffix '{}'", suffix))
            }),
    }
}
