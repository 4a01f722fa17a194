//! Line mapping endpoints.
//!
//! - GET /api/v1/history/mapping?start=<rev>&finish=<rev>
//!   Forward and backward zero-based line maps between two revisions.
//!
//! - GET /api/v1/history/map-line?start=<rev>&finish=<rev>&line=<n>
//!   Counterpart of a single zero-based line of `start` in `finish`.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::lock_poisoned;
use crate::error::Result;
use crate::git::SharedHistory;
use crate::models::{LineMapping, MapLineResponse};

pub fn routes(history: SharedHistory) -> Router {
    Router::new()
        .route("/api/v1/history/mapping", get(get_mapping))
        .route("/api/v1/history/map-line", get(get_map_line))
        .with_state(history)
}

#[derive(Debug, Deserialize)]
struct MappingQuery {
    start: String,
    finish: String,
}

#[derive(Debug, Deserialize)]
struct MapLineQuery {
    start: String,
    finish: String,
    line: usize,
}

async fn get_mapping(
    State(history): State<SharedHistory>,
    Query(query): Query<MappingQuery>,
) -> Result<Json<LineMapping>> {
    let mut history = history.write().map_err(lock_poisoned)?;
    let mapping = history.line_mapping(&query.start, &query.finish)?;
    Ok(Json(mapping))
}

async fn get_map_line(
    State(history): State<SharedHistory>,
    Query(query): Query<MapLineQuery>,
) -> Result<Json<MapLineResponse>> {
    let mut history = history.write().map_err(lock_poisoned)?;
    let target = history.map_line(&query.start, &query.finish, query.line)?;
    Ok(Json(MapLineResponse {
        start: query.start,
        finish: query.finish,
        line: query.line,
        target,
    }))
}
