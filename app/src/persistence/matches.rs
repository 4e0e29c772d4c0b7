use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use models::domains::matches;
use models::domains::sea_orm_active_enums::MatchStatus;
use models::queries::MatchQuery;

pub async fn get_match<C: ConnectionTrait>(
    conn: &C,
    match_id: i32,
) -> Result<Option<matches::Model>, DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

pub async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    fixtures: Vec<matches::ActiveModel>,
) -> Result<u64, DbErr> {
    if fixtures.is_empty() {
        return Ok(0);
    }
    matches::Entity::insert_many(fixtures)
        .exec_without_returning(conn)
        .await
}

/// Deletes the league fixtures of one regeneration scope. Bracket fixtures
/// never carry a season_day and are untouched.
pub async fn clear_league_fixtures<C: ConnectionTrait>(
    conn: &C,
    season_id: i32,
    division: i32,
    subdivision: &str,
    first_day: i32,
    last_day: i32,
) -> Result<u64, DbErr> {
    let res = matches::Entity::delete_many()
        .filter(matches::Column::SeasonId.eq(season_id))
        .filter(matches::Column::Division.eq(division))
        .filter(matches::Column::Subdivision.eq(subdivision))
        .filter(matches::Column::SeasonDay.between(first_day, last_day))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn count_for_tournament<C: ConnectionTrait>(
    conn: &C,
    tournament_id: &str,
) -> Result<u64, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::TournamentId.eq(tournament_id))
        .count(conn)
        .await
}

pub async fn list_for_tournament<C: ConnectionTrait>(
    conn: &C,
    tournament_id: &str,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::TournamentId.eq(tournament_id))
        .order_by_asc(matches::Column::Round)
        .order_by_asc(matches::Column::BracketSlot)
        .all(conn)
        .await
}

/// IN_PROGRESS matches created before the cutoff — abandoned live sessions
/// the reconciler has to finish.
pub async fn find_stuck<C: ConnectionTrait>(
    conn: &C,
    cutoff: DateTime<Utc>,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(MatchStatus::InProgress))
        .filter(matches::Column::CreatedAt.lt(cutoff.fixed_offset()))
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn complete_match<C: ConnectionTrait>(
    conn: &C,
    fixture: matches::Model,
    home_score: i32,
    away_score: i32,
    simulated: bool,
) -> Result<matches::Model, DbErr> {
    let mut active: matches::ActiveModel = fixture.into();
    active.status = Set(MatchStatus::Completed);
    active.home_score = Set(Some(home_score));
    active.away_score = Set(Some(away_score));
    active.simulated = Set(simulated);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(conn).await
}

/// The authoritative input of a statistics resync: every COMPLETED match
/// the team took part in, on either side.
pub async fn list_completed_for_team<C: ConnectionTrait>(
    conn: &C,
    team_id: i32,
) -> Result<Vec<matches::Model>, DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Status.eq(MatchStatus::Completed))
        .filter(
            matches::Column::HomeTeamId
                .eq(team_id)
                .or(matches::Column::AwayTeamId.eq(team_id)),
        )
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    query: MatchQuery,
) -> Result<Vec<matches::Model>, DbErr> {
    let mut sql_query = matches::Entity::find();

    if let Some(season_day) = query.season_day {
        sql_query = sql_query.filter(matches::Column::SeasonDay.eq(season_day));
    }
    if let Some(tournament_id) = query.tournament_id {
        sql_query = sql_query.filter(matches::Column::TournamentId.eq(tournament_id));
    }
    if let Some(status) = query.status {
        sql_query = sql_query.filter(matches::Column::Status.eq(status));
    }

    sql_query
        .order_by_asc(matches::Column::ScheduledAt)
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}
