//! Error types for Newswire services
//!
//! Collapses heterogeneous failure causes (validation, missing rows, store
//! failures, routing misses) into a small, stable taxonomy with:
//! - HTTP status code mapping
//! - A single `{"msg": ...}` response body shape
//! - Error kinds for machine-readable identification

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Closed set of error kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Client sent structurally invalid input (400)
    MalformedInput,

    /// Syntactically valid reference to a nonexistent row (422)
    NotFound,

    /// Matched route, unsupported method (405)
    MethodNotAllowed,

    /// No route matched at all (404)
    RouteNotFound,

    /// Unexpected store/runtime failure (500)
    Internal,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Bad Request")]
    BadRequest,

    // Missing-row errors
    #[error("Article ID Does Not Exist")]
    ArticleNotFound { id: i32 },

    #[error("ID Does Not Exist")]
    IdNotFound,

    #[error("Delete Unsuccessful - ID Not Found")]
    DeleteTargetNotFound { id: i32 },

    #[error("Username Does Not Exist")]
    UserNotFound { username: String },

    // Routing errors
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Path does not exist")]
    RouteNotFound,

    // Store / runtime errors
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Internal server error: {message}")]
    Internal { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::BadRequest => ErrorKind::MalformedInput,
            AppError::ArticleNotFound { .. }
            | AppError::IdNotFound
            | AppError::DeleteTargetNotFound { .. }
            | AppError::UserNotFound { .. } => ErrorKind::NotFound,
            AppError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            AppError::RouteNotFound => ErrorKind::RouteNotFound,
            AppError::Database(_) | AppError::Internal { .. } | AppError::Other(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// 422 is used uniformly for "valid identifier, missing row"; 404 is
    /// reserved for unmatched routes.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MalformedInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::RouteNotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal failure detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal Server Error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error response body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();
        let msg = self.public_message();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %self,
                kind = ?kind,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %self,
                kind = ?kind,
                status = status.as_u16(),
                "Client error"
            );
        }

        (status, Json(ErrorResponse { msg })).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // A foreign-key violation means the client referenced a row that is
        // not there (e.g. commenting on a deleted article), so it classifies
        // as a missing-row error, not an internal one.
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::IdNotFound,
            _ => AppError::Database(err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
