//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every failure the history engine can report and
//! implements Axum's `IntoResponse` so route handlers can return it directly
//! with a JSON error body.
//!
//! Error mappings:
//! - `InvalidRevision`, `UntrackedFile`, `BlameUnavailable`,
//!   `ContentUnavailable`, `RepoNotFound` → 404
//! - `MalformedBlame`, `Git`, `Internal` → 500
//!
//! `InvalidRevision` and `UntrackedFile` are only raised while opening a file
//! history. The others are per-operation and leave the engine usable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is not a valid commit, branch, tag, etc.")]
    InvalidRevision(String),

    #[error("\"{0}\" is not tracked by git")]
    UntrackedFile(String),

    #[error("Blame unavailable for {path} at {sha}")]
    BlameUnavailable { path: String, sha: String },

    #[error("Content unavailable for {path} at {revision}")]
    ContentUnavailable { path: String, revision: String },

    #[error("Malformed blame output: {0}")]
    MalformedBlame(String),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRevision(_)
            | AppError::UntrackedFile(_)
            | AppError::BlameUnavailable { .. }
            | AppError::ContentUnavailable { .. }
            | AppError::RepoNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedBlame(_)
            | AppError::Git(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
