use thiserror::Error;

use crate::schema::ValueType;

/// Filter construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Pattern could not be compiled.
    #[error("invalid pattern `{0}`")]
    InvalidPattern(String),
    /// Unknown field member.
    #[error("unknown filter member `{0}`")]
    UnknownMember(String),
    /// Type mismatch error.
    #[error("expected filter type `{expected}` on `{name}`, but got `{actual}`")]
    InvalidType {
        /// Field name.
        name: String,
        /// Expected type.
        expected: ValueType,
        /// Actual type.
        actual: ValueType,
    },
}

/// Filter result type.
pub type FilterResult<T> = Result<T, FilterError>;

impl From<regex::Error> for FilterError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}
