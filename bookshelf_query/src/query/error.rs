use thiserror::Error;

use crate::{filter::error::FilterError, ordering::error::OrderingError};

/// Query processing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Filter error.
    #[error("filter error: {0}")]
    FilterError(#[from] FilterError),
    /// Ordering error.
    #[error("ordering error: {0}")]
    OrderingError(#[from] OrderingError),
}

/// Query result type.
pub type QueryResult<T> = Result<T, QueryError>;
