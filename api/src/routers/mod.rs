use axum::Router;

pub mod matches;
pub mod repairs;
pub mod root;
pub mod schedule;
pub mod seasons;
pub mod teams;
pub mod tournaments;

use app::state::AppState;
use matches::create_match_router;
use repairs::create_repair_router;
use root::create_root_router;
use schedule::create_schedule_router;
use seasons::create_season_router;
use teams::create_team_router;
use tournaments::create_tournament_router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_root_router())
        .nest("/seasons", create_season_router())
        .nest("/schedule", create_schedule_router())
        .nest("/tournaments", create_tournament_router())
        .nest("/teams", create_team_router())
        .nest("/matches", create_match_router())
        .nest("/repairs", create_repair_router())
        .with_state(state)
}
