use axum::{Router, extract::State, response::IntoResponse, routing::post};

use app::core::schedule;
use app::persistence::seasons;
use app::state::AppState;
use models::params::schedule::GenerateScheduleParams;

use crate::extractor::{Json, Valid};
use crate::{ApiResponse, error::ApiError};

async fn schedule_generate_post(
    state: State<AppState>,
    Valid(Json(params)): Valid<Json<GenerateScheduleParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let season = seasons::require_current(&state.conn)
        .await
        .map_err(ApiError::from)?;

    let outcome = schedule::generate_schedule(&state.conn, &state.config, &season, &params)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Schedule generated", Some(outcome));
    Ok(Json(response))
}

pub fn create_schedule_router() -> Router<AppState> {
    Router::new().route("/generate", post(schedule_generate_post))
}
