//! History and cursor endpoints.
//!
//! - GET /api/v1/history
//!   Commits touching the file, newest first, with the cursor position.
//!
//! - GET /api/v1/history/current
//!   Commit under the cursor, its position and the history length.
//!
//! - POST /api/v1/history/forward, POST /api/v1/history/backward
//!   Moves the cursor one commit. `moved` is false at either end.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::lock_poisoned;
use crate::error::Result;
use crate::git::{FileHistory, GitBackend, SharedHistory};
use crate::models::{CommitDetail, CurrentResponse, CursorResponse, HistoryResponse};

pub fn routes(history: SharedHistory) -> Router {
    Router::new()
        .route("/api/v1/history", get(get_history))
        .route("/api/v1/history/current", get(get_current))
        .route("/api/v1/history/forward", post(step_forward))
        .route("/api/v1/history/backward", post(step_backward))
        .with_state(history)
}

async fn get_history(State(history): State<SharedHistory>) -> Result<Json<HistoryResponse>> {
    let history = history.read().map_err(lock_poisoned)?;
    Ok(Json(HistoryResponse {
        path: history.path().to_string(),
        position: history.position(),
        total: history.len(),
        commits: history.commits().iter().map(CommitDetail::from).collect(),
    }))
}

async fn get_current(State(history): State<SharedHistory>) -> Result<Json<CurrentResponse>> {
    let history = history.read().map_err(lock_poisoned)?;
    Ok(Json(current_of(&*history)))
}

fn current_of<B: GitBackend>(history: &FileHistory<B>) -> CurrentResponse {
    CurrentResponse {
        path: history.current().path.clone(),
        position: history.position(),
        total: history.len(),
        commit: CommitDetail::from(history.current()),
    }
}

async fn step_forward(State(history): State<SharedHistory>) -> Result<Json<CursorResponse>> {
    let mut history = history.write().map_err(lock_poisoned)?;
    let moved = history.step_forward();
    Ok(Json(CursorResponse {
        moved,
        position: history.position(),
        commit: CommitDetail::from(history.current()),
    }))
}

async fn step_backward(State(history): State<SharedHistory>) -> Result<Json<CursorResponse>> {
    let mut history = history.write().map_err(lock_poisoned)?;
    let moved = history.step_backward();
    Ok(Json(CursorResponse {
        moved,
        position: history.position(),
        commit: CommitDetail::from(history.current()),
    }))
}
