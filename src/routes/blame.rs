//! Blame endpoint.
//!
//! GET /api/v1/history/blame
//!
//! Returns per-line attribution for the file at the commit under the cursor,
//! under the name the file had in that commit.
//! Cached until the cursor moves.

use axum::{extract::State, routing::get, Json, Router};

use super::lock_poisoned;
use crate::error::Result;
use crate::git::SharedHistory;
use crate::models::BlameResponse;

pub fn routes(history: SharedHistory) -> Router {
    Router::new()
        .route("/api/v1/history/blame", get(get_blame))
        .with_state(history)
}

async fn get_blame(State(history): State<SharedHistory>) -> Result<Json<BlameResponse>> {
    // Filling the cache needs exclusive access.
    let mut history = history.write().map_err(lock_poisoned)?;
    let path = history.current().path.clone();
    let commit = history.current().sha.clone();
    let lines = history.blame()?.to_vec();

    Ok(Json(BlameResponse { path, commit, lines }))
}
