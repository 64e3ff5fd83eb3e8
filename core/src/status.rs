//! Operation outcome types shared by the response builder and decoder.
//!
//! # Design
//! `Status` never stores a validity flag. `is_valid()` is derived from the
//! error list, so the two cannot diverge. Errors keep insertion order; the
//! wire encoding and the decoder both depend on it.

use std::fmt;

/// Message a fresh `Status` carries until an operation replaces it.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// One validation or business-rule failure.
///
/// `message` should never be empty. An empty `member_names` list marks the
/// error as global rather than attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub member_names: Vec<String>,
}

impl ValidationError {
    pub fn new<I, S>(message: impl Into<String>, member_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            member_names: member_names.into_iter().map(Into::into).collect(),
        }
    }

    /// An error not tied to any field.
    pub fn global(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            member_names: Vec::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.member_names.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a business operation or CRUD action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    message: String,
    errors: Vec<ValidationError>,
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    pub fn new() -> Self {
        Self {
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Record a failure against zero or more fields.
    pub fn add_error<I, S>(&mut self, message: impl Into<String>, member_names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.push(ValidationError::new(message, member_names));
        self
    }

    pub fn add_global_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(ValidationError::global(message));
        self
    }

    pub fn add_validation_errors(
        &mut self,
        errors: impl IntoIterator<Item = ValidationError>,
    ) -> &mut Self {
        self.errors.extend(errors);
        self
    }

    /// Append the errors of `other`, leaving this status's message alone.
    pub fn combine(&mut self, other: Status) -> &mut Self {
        self.errors.extend(other.errors);
        self
    }

    /// All error messages joined with `separator`, for assertion output and logs.
    pub fn all_errors(&self, separator: &str) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// A `Status` paired with the value an operation produced, if any.
///
/// A valid outcome with `result == None` means "nothing to return", which is
/// distinct from a validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub status: Status,
    pub result: Option<T>,
}

impl<T> Outcome<T> {
    pub fn new(status: Status, result: Option<T>) -> Self {
        Self { status, result }
    }

    pub fn success(result: T) -> Self {
        Self {
            status: Status::new(),
            result: Some(result),
        }
    }

    pub fn failed(status: Status) -> Self {
        Self { status, result: None }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}
