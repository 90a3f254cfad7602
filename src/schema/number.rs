//! Number schema validation.
//!
//! This module provides [`NumberSchema`] for validating JSON numbers with
//! integer, bound and sign constraints.

use std::ops::RangeInclusive;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::kind::{finish, invalid_type};
use super::traits::SchemaLike;

/// A constraint applied to number values.
#[derive(Clone)]
enum NumberConstraint {
    Int { message: Option<String> },
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    Negative { message: Option<String> },
    NonNegative { message: Option<String> },
    NonPositive { message: Option<String> },
}

impl NumberConstraint {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            NumberConstraint::Int { message }
            | NumberConstraint::Min { message, .. }
            | NumberConstraint::Max { message, .. }
            | NumberConstraint::Positive { message }
            | NumberConstraint::Negative { message }
            | NumberConstraint::NonNegative { message }
            | NumberConstraint::NonPositive { message } => message,
        }
    }
}

/// A numeric bound accepted by [`NumberSchema::min`] and [`NumberSchema::max`].
///
/// Implemented for every primitive integer and float so bounds held as
/// `i64`, `u64` or `usize` need no cast. Integers past 2^53 round to the
/// nearest `f64`.
pub trait NumericBound: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_bound {
    ($($ty:ty),*) => {
        $(
            impl NumericBound for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A schema for validating numbers.
///
/// Every JSON number is accepted by the type check; JSON has no NaN or
/// infinity. Constraints are all evaluated and every violation is reported.
/// The output is the input number unchanged, so `3` stays an integer and
/// `3.0` stays a float.
///
/// # Example
///
/// ```rust
/// use sift::{v, IssueCode, SchemaExt};
/// use serde_json::json;
///
/// let schema = v::number().int().min(0).max(100);
///
/// assert_eq!(schema.parse(&json!(42)).unwrap(), json!(42));
///
/// let err = schema.parse(&json!(-2.5)).unwrap_err();
/// let codes: Vec<IssueCode> = err.issues().iter().map(|i| i.code).collect();
/// assert_eq!(codes, vec![IssueCode::InvalidType, IssueCode::TooSmall]);
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires a whole number. `2.0` counts as whole.
    pub fn int(self) -> Self {
        self.push(NumberConstraint::Int { message: None })
    }

    /// Inclusive lower bound.
    pub fn min(self, value: impl NumericBound) -> Self {
        self.push(NumberConstraint::Min {
            value: value.to_f64(),
            message: None,
        })
    }

    /// Inclusive upper bound.
    pub fn max(self, value: impl NumericBound) -> Self {
        self.push(NumberConstraint::Max {
            value: value.to_f64(),
            message: None,
        })
    }

    /// Shorthand for `.min(start).max(end)`.
    ///
    /// ```rust
    /// use sift::{v, SchemaExt};
    /// use serde_json::json;
    ///
    /// let percent = v::number().range(0.0..=100.0);
    /// assert!(percent.parse(&json!(100)).is_ok());
    /// assert!(percent.parse(&json!(100.5)).is_err());
    /// ```
    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    /// Strictly greater than zero.
    pub fn positive(self) -> Self {
        self.push(NumberConstraint::Positive { message: None })
    }

    /// Strictly less than zero.
    pub fn negative(self) -> Self {
        self.push(NumberConstraint::Negative { message: None })
    }

    pub fn nonnegative(self) -> Self {
        self.push(NumberConstraint::NonNegative { message: None })
    }

    pub fn nonpositive(self) -> Self {
        self.push(NumberConstraint::NonPositive { message: None })
    }

    /// Sets the message of the most recent constraint, or of the type check
    /// when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(last) => *last.message_mut() = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn push(mut self, constraint: NumberConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    fn validate(
        &self,
        input: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Option<Value>, Issues> {
        let (raw, n) = match input {
            Some(Value::Number(raw)) => match raw.as_f64() {
                Some(n) => (raw, n),
                None => {
                    return invalid_type(path, "number", input, self.type_error_message.as_ref())
                }
            },
            _ => return invalid_type(path, "number", input, self.type_error_message.as_ref()),
        };

        let is_integer = raw.is_i64() || raw.is_u64() || n.fract() == 0.0;

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, n, is_integer, path))
            .collect();

        finish(Some(Value::Number(raw.clone())), issues)
    }

    fn type_name(&self) -> &'static str {
        "number"
    }
}

fn check_constraint(
    constraint: &NumberConstraint,
    n: f64,
    is_integer: bool,
    path: &IssuePath,
) -> Option<Issue> {
    let issue = |code: IssueCode, message: &Option<String>, default: String| {
        Issue::new(path.clone(), code, message.clone().unwrap_or(default))
            .with_received(n.to_string())
    };

    match constraint {
        NumberConstraint::Int { message } => (!is_integer).then(|| {
            Issue::new(
                path.clone(),
                IssueCode::InvalidType,
                message
                    .clone()
                    .unwrap_or_else(|| "Expected integer, received float".to_string()),
            )
            .with_expected("integer")
            .with_received("float")
        }),
        NumberConstraint::Min { value, message } => (n < *value).then(|| {
            issue(
                IssueCode::TooSmall,
                message,
                format!("Number must be greater than or equal to {}", value),
            )
            .with_expected(format!(">= {}", value))
        }),
        NumberConstraint::Max { value, message } => (n > *value).then(|| {
            issue(
                IssueCode::TooBig,
                message,
                format!("Number must be less than or equal to {}", value),
            )
            .with_expected(format!("<= {}", value))
        }),
        NumberConstraint::Positive { message } => (n <= 0.0).then(|| {
            issue(
                IssueCode::TooSmall,
                message,
                "Number must be greater than 0".to_string(),
            )
            .with_expected("> 0")
        }),
        NumberConstraint::NonNegative { message } => (n < 0.0).then(|| {
            issue(
                IssueCode::TooSmall,
                message,
                "Number must be greater than or equal to 0".to_string(),
            )
            .with_expected(">= 0")
        }),
        NumberConstraint::Negative { message } => (n >= 0.0).then(|| {
            issue(
                IssueCode::TooBig,
                message,
                "Number must be less than 0".to_string(),
            )
            .with_expected("< 0")
        }),
        NumberConstraint::NonPositive { message } => (n > 0.0).then(|| {
            issue(
                IssueCode::TooBig,
                message,
                "Number must be less than or equal to 0".to_string(),
            )
            .with_expected("<= 0")
        }),
    }
}
