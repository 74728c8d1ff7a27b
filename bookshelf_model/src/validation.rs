use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::author::AuthorId;

/// A payload that failed write-time validation.
///
/// Carries every violation found, not only the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

/// A single rule broken by a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("`{0}` is required")]
    RequiredFieldMissing(&'static str),
    #[error("publisher `{0}` is not a permitted value")]
    InvalidPublisher(String),
    #[error("page count must be between 10 and 5000, got {0}")]
    PageCountOutOfRange(i64),
    #[error("`{field}` is not a valid reference: `{value}`")]
    InvalidReference { field: &'static str, value: String },
    #[error("author `{0}` does not exist")]
    UnknownAuthor(AuthorId),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::new(vec![violation])
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for (i, violation) in self.violations.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            violation.fmt(f)?;
        }
        Ok(())
    }
}

/// Collects violations while a payload is checked field by field.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Keeps the value on success, records the violation otherwise.
    pub fn check<T>(&mut self, result: Result<T, Violation>) -> Option<T> {
        result.map_err(|violation| self.push(violation)).ok()
    }

    /// Builds the validated value once no violation was recorded.
    ///
    /// `value` only sees fields that passed their checks, so it yields `None`
    /// exclusively when a violation exists.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> ValidationResult<T> {
        if !self.0.is_empty() {
            return Err(ValidationError::new(self.0));
        }
        value().ok_or_else(|| ValidationError::new(Vec::new()))
    }
}

/// Required text field. Surrounding whitespace is dropped, and a value that
/// is blank afterwards counts as missing.
pub(crate) fn required(field: &'static str, value: Option<&str>) -> Result<String, Violation> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or(Violation::RequiredFieldMissing(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = ValidationError::new(vec![
            Violation::RequiredFieldMissing("title"),
            Violation::PageCountOutOfRange(9),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: `title` is required; page count must be between 10 and 5000, got 9"
        );
        assert!(err.contains(&Violation::PageCountOutOfRange(9)));
    }

    #[test]
    fn required_trims() {
        assert_eq!(required("title", Some("  Clean Code ")).unwrap(), "Clean Code");
        for value in [None, Some(""), Some(" \t ")] {
            assert_eq!(
                required("title", value),
                Err(Violation::RequiredFieldMissing("title"))
            );
        }
    }
}
