use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use app::core::phase;
use app::persistence::seasons;
use app::state::AppState;
use models::params::season::AdvancePhaseParams;
use models::schemas::season::SeasonSchema;

use crate::extractor::{Json, Valid};
use crate::{ApiResponse, error::ApiError};

/// Bootstraps season 1. Calling again once a season exists returns the
/// current season unchanged.
async fn seasons_post(state: State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if let Some(season) = seasons::current_season(&state.conn)
        .await
        .map_err(ApiError::from)?
    {
        let result =
            ApiResponse::success("Season already exists", Some(SeasonSchema::from(season)));
        return Ok(Json(result));
    }

    let season = seasons::create_season(&state.conn, 1, Utc::now().fixed_offset())
        .await
        .map_err(ApiError::from)?;

    let result = ApiResponse::success("Season created", Some(SeasonSchema::from(season)));
    Ok(Json(result))
}

async fn seasons_current_get(state: State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let season = seasons::require_current(&state.conn)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Season retrieved", Some(SeasonSchema::from(season)));
    Ok(Json(response))
}

async fn seasons_advance_post(
    state: State<AppState>,
    Path(season_id): Path<i32>,
    Valid(Json(params)): Valid<Json<AdvancePhaseParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = phase::advance_phase(&state.conn, &state.config, season_id, params.target)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Phase advanced", Some(outcome));
    Ok(Json(response))
}

/// Administrative day tick, same effect as one timer tick.
async fn seasons_tick_post(
    state: State<AppState>,
    Path(season_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = phase::tick_day(&state.conn, &state.config, season_id)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Day advanced", Some(outcome));
    Ok(Json(response))
}

pub fn create_season_router() -> Router<AppState> {
    Router::new()
        .route("/", post(seasons_post))
        .route("/current", get(seasons_current_get))
        .route("/{id}/advance", post(seasons_advance_post))
        .route("/{id}/tick", post(seasons_tick_post))
}
