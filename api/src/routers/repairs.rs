use axum::{Router, extract::State, response::IntoResponse, routing::post};

use app::core::reconciler;
use app::state::AppState;

use crate::extractor::Json;
use crate::{ApiResponse, error::ApiError};

async fn repairs_stuck_matches_post(
    state: State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = reconciler::repair_stuck_matches(&state.conn, &state.config)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Stuck match repair pass finished", Some(outcome));
    Ok(Json(response))
}

pub fn create_repair_router() -> Router<AppState> {
    Router::new().route("/stuck-matches", post(repairs_stuck_matches_post))
}
