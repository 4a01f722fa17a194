//! API route handlers - maps HTTP endpoints to file history operations.
//!
//! Each submodule defines routes for a feature area:
//! - `history`: Commit list and cursor movement
//! - `blame`: Per-line attribution at the current commit
//! - `mapping`: Line correspondence between two revisions

pub mod blame;
pub mod history;
pub mod mapping;

use axum::Router;

use crate::error::AppError;
use crate::git::SharedHistory;

pub fn create_router(history: SharedHistory) -> Router {
    Router::new()
        .merge(history::routes(history.clone()))
        .merge(blame::routes(history.clone()))
        .merge(mapping::routes(history))
}

fn lock_poisoned<T>(_: T) -> AppError {
    AppError::Internal("Lock poisoned".to_string())
}
