use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};

use app::core::reconciler;
use app::error::EngineError;
use app::persistence::teams;
use app::state::AppState;
use models::params::team::CreateTeamParams;
use models::queries::StandingsQuery;
use models::schemas::pagination::ListSchema;
use models::schemas::team::TeamSchema;

use crate::extractor::{Json, Valid};
use crate::{ApiResponse, error::ApiError};

async fn teams_post(
    state: State<AppState>,
    Valid(Json(params)): Valid<Json<CreateTeamParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::create_team(&state.conn, params)
        .await
        .map_err(ApiError::from)?;

    let result = ApiResponse::success("Team created", Some(TeamSchema::from(team)));
    Ok(Json(result))
}

/// Teams in standings order for one subdivision, or every team when the
/// scope filters are omitted.
async fn teams_get(
    state: State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let teams = match (query.division, query.subdivision) {
        (Some(division), Some(subdivision)) => {
            teams::standings(&state.conn, division, &subdivision)
                .await
                .map_err(ApiError::from)?
        }
        _ => {
            let mut all = Vec::new();
            for (division, subdivision) in teams::list_subdivisions(&state.conn)
                .await
                .map_err(ApiError::from)?
            {
                all.extend(
                    teams::standings(&state.conn, division, &subdivision)
                        .await
                        .map_err(ApiError::from)?,
                );
            }
            all
        }
    };

    let response = ApiResponse::success(
        "Teams retrieved",
        Some(ListSchema::<TeamSchema>::from(teams)),
    );
    Ok(Json(response))
}

async fn teams_id_get(
    state: State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::get_team(&state.conn, id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::from(EngineError::TeamNotFound(id)))?;

    let response = ApiResponse::success("Team retrieved", Some(TeamSchema::from(team)));
    Ok(Json(response))
}

async fn teams_resync_post(
    state: State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = reconciler::resync_team_statistics(&state.conn, id)
        .await
        .map_err(ApiError::from)?;

    let response = ApiResponse::success("Team statistics resynced", Some(outcome));
    Ok(Json(response))
}

pub fn create_team_router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams_get))
        .route("/", post(teams_post))
        .route("/{id}", get(teams_id_get))
        .route("/{id}/resync", post(teams_resync_post))
}
