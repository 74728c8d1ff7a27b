use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use bookshelf_model::validation::ValidationError;
use bookshelf_query::{filter::error::FilterError, query::error::QueryError};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Application error types.
///
/// Every variant maps to one HTTP status and renders into an
/// [`ErrorEnvelope`].
#[derive(Debug, Error)]
pub enum AppError {
    /// A lookup by identifier failed, either because the identifier is
    /// malformed or because nothing is stored under it.
    #[error("{0}")]
    NotFound(String),

    /// A payload broke one or more write-time rules.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Malformed query parameters or request body.
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure, the message is never shown to clients.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Storage adapter errors.
///
/// Malformed identifiers are reported as their own variant so callers can
/// match on them instead of inspecting error types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed identifier `{0}`")]
    MalformedId(String),
    #[error("invalid query: {0}")]
    Query(#[from] QueryError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    pub status: u16,
}

const INTERNAL_MESSAGE: &str = "internal server error";

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error into a response envelope.
    pub fn render(&self) -> ErrorEnvelope {
        let message = match self {
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        };
        ErrorEnvelope {
            message,
            status: self.status().as_u16(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(_) = &self {
            error!("internal service error: {}", self);
        }
        (self.status(), Json(self.render())).into_response()
    }
}

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(config::ConfigError, std::io::Error, FilterError);

macro_rules! impl_bad_request_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::BadRequest(err.body_text())
            }
        }
        )*
    };
}
impl_bad_request_errors!(JsonRejection, QueryRejection);

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(id) => Self::not_found(format!("id `{id}` not found")),
            StoreError::Query(_) | StoreError::Unavailable(_) => Self::Internal(Box::new(err)),
        }
    }
}
