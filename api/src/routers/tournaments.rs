use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};

use app::core::bracket;
use app::error::EngineError;
use app::persistence::tournaments;
use app::state::AppState;
use models::schemas::tournament::TournamentSchema;

use crate::extractor::Json;
use crate::{ApiResponse, error::ApiError};

async fn tournaments_id_get(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = tournaments::find_tournament(&state.conn, &id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::from(EngineError::TournamentNotFound(id.clone())))?;
    let entries = tournaments::list_entries(&state.conn, &id)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success(
        "Tournament retrieved",
        Some(TournamentSchema::new(tournament, entries)),
    );
    Ok(Json(response))
}

async fn tournaments_bracket_post(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = bracket::generate_bracket(&state.conn, &state.config, &id)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Bracket generated", Some(outcome));
    Ok(Json(response))
}

pub fn create_tournament_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(tournaments_id_get))
        .route("/{id}/bracket", post(tournaments_bracket_post))
}
