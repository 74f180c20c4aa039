//! Error types for every layer of the pipeline.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A single dump row that could not be turned into a record.
///
/// Row errors are always recoverable: the parser logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("too few columns: expected at least {expected}, got {actual}")]
    TooFewColumns { expected: usize, actual: usize },

    #[error("invalid hardware address '{0}'")]
    InvalidAddress(String),

    #[error("invalid {field} timestamp '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid {field} value '{value}'")]
    InvalidInteger { field: &'static str, value: String },
}

/// The dump as a whole is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DumpError {
    #[error("client section header not found in dump")]
    MissingClientSection,
}

/// A refresh cycle failed and the previous snapshot was kept.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("failed to read dump {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dump(#[from] DumpError),
}

/// Errors surfaced by configuration loading and the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Template(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        tracing::error!("{}: {}", status, message);
        (status, message).into_response()
    }
}
