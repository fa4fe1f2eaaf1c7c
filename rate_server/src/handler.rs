//! HTTP handler for the latest-rates resource.
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error, warn};
use rand::Rng;
use rate_common::rate::LatestRates;
use std::sync::{Arc, RwLock};

/// Shared state of the HTTP routes.
#[derive(Clone)]
pub struct AppState {
    /// Board written by the generator.
    pub board: Arc<RwLock<LatestRates>>,
    /// Probability of answering with an injected failure.
    pub fail_ratio: f64,
}

/// `GET /v2/latest`: the current board, or a 500 with an empty body when a
/// failure is injected.
pub async fn latest(State(state): State<AppState>) -> Response {
    if rand::rng().random_bool(state.fail_ratio) {
        warn!("Injecting failure: 500 with empty body");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let latest = match state.board.read() {
        Ok(board) => board.clone(),
        Err(e) => {
            error!("Rate board unavailable: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    debug!("Serving board updated at {:?}", latest.last_update);
    Json(latest).into_response()
}
