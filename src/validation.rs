//! Parse results and the panic guard used at callback boundaries.
//!
//! [`ParseResult`] is what `safe_parse` returns: a tagged success or failure
//! that the request layer can inspect or serialize directly. [`guard`] runs
//! user code and converts an unwinding panic into its message so validation
//! never unwinds past a schema boundary it controls.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ValidationError;

/// Outcome of a non-failing parse.
///
/// Exactly one variant is populated, and [`ParseResult::is_success`] always
/// agrees with it.
///
/// # Example
///
/// ```rust
/// use sift::{v, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::object()
///     .field("name", v::string().min(2))
///     .field("age", v::number().int().min(18));
///
/// let result = schema.safe_parse(&json!({"name": "J", "age": 15}));
/// assert!(!result.is_success());
///
/// let err = result.error().unwrap();
/// let paths: Vec<String> = err.issues().iter().map(|i| i.path.to_string()).collect();
/// assert_eq!(paths, vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Success(Value),
    Failure(ValidationError),
}

impl ParseResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The parsed value, when successful.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ParseResult::Success(value) => Some(value),
            ParseResult::Failure(_) => None,
        }
    }

    /// The validation error, when failed.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ParseResult::Success(_) => None,
            ParseResult::Failure(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<Value, ValidationError> {
        self.into()
    }
}

impl From<Result<Value, ValidationError>> for ParseResult {
    fn from(result: Result<Value, ValidationError>) -> Self {
        match result {
            Ok(value) => ParseResult::Success(value),
            Err(err) => ParseResult::Failure(err),
        }
    }
}

impl From<ParseResult> for Result<Value, ValidationError> {
    fn from(result: ParseResult) -> Self {
        match result {
            ParseResult::Success(value) => Ok(value),
            ParseResult::Failure(err) => Err(err),
        }
    }
}

/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": {"issues": [...]}}`.
impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParseResult", 2)?;
        match self {
            ParseResult::Success(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", value)?;
            }
            ParseResult::Failure(err) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", err)?;
            }
        }
        state.end()
    }
}

/// Runs `f`, turning a panic into its message.
///
/// The default panic hook still reports the panic; only the unwind is
/// stopped here.
pub(crate) fn guard<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(&*payload))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
