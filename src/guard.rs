//! Parameter guards.
//!
//! Precondition checks that fail with a descriptive [`ArgumentError`] at the
//! call site. None of them recover; the caller gets the error as-is.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("the parameter '{0}' cannot be null")]
    Null(&'static str),

    #[error("the parameter '{0}' cannot be empty")]
    Empty(&'static str),

    #[error("the parameter '{0}' is out of range")]
    OutOfRange(&'static str),

    #[error("{message}")]
    Criteria { name: &'static str, message: String },
}

impl ArgumentError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match *self {
            Self::Null(name) | Self::Empty(name) | Self::OutOfRange(name) => name,
            Self::Criteria { name, .. } => name,
        }
    }
}

/// Unwraps `parameter`, failing with [`ArgumentError::Null`] when it is `None`.
pub fn is_not_null<T>(parameter: Option<T>, name: &'static str) -> Result<T, ArgumentError> {
    parameter.ok_or(ArgumentError::Null(name))
}

/// Fails when `parameter` is `None` or has no characters.
pub fn is_not_null_or_empty<'a>(
    parameter: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, ArgumentError> {
    let parameter = is_not_null(parameter, name)?;
    is_not_empty(parameter, name)
}

/// Fails when `parameter` has no characters.
pub fn is_not_empty<'a>(parameter: &'a str, name: &'static str) -> Result<&'a str, ArgumentError> {
    if parameter.is_empty() {
        return Err(ArgumentError::Empty(name));
    }
    Ok(parameter)
}

/// Fails with `fail_message` when `predicate` holds for `parameter`.
///
/// The predicate describes the *invalid* case.
pub fn matches_specific_criteria<T, F>(
    parameter: &T,
    name: &'static str,
    predicate: F,
    fail_message: &str,
) -> Result<(), ArgumentError>
where
    T: ?Sized,
    F: FnOnce(&T) -> bool,
{
    if predicate(parameter) {
        return Err(ArgumentError::Criteria {
            name,
            message: fail_message.to_string(),
        });
    }
    Ok(())
}

/// Fails with [`ArgumentError::OutOfRange`] when `count` is larger than `len`.
pub(crate) fn is_within(count: usize, len: usize, name: &'static str) -> Result<(), ArgumentError> {
    if count > len {
        return Err(ArgumentError::OutOfRange(name));
    }
    Ok(())
}
