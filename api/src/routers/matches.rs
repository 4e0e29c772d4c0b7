use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};

use app::persistence::matches;
use app::state::AppState;
use models::queries::MatchQuery;
use models::schemas::fixture::FixtureSchema;
use models::schemas::pagination::ListSchema;

use crate::extractor::Json;
use crate::{ApiResponse, error::ApiError};

async fn matches_get(
    state: State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let fixtures = matches::search(&state.conn, query)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success(
        "Matches retrieved",
        Some(ListSchema::<FixtureSchema>::from(fixtures)),
    );
    Ok(Json(response))
}

pub fn create_match_router() -> Router<AppState> {
    Router::new().route("/", get(matches_get))
}
