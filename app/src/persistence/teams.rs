use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use models::domains::teams;
use models::params::team::CreateTeamParams;
use models::schemas::team::TeamRecord;

pub async fn create_team<C: ConnectionTrait>(
    conn: &C,
    params: CreateTeamParams,
) -> Result<teams::Model, DbErr> {
    let now = Utc::now().fixed_offset();
    teams::ActiveModel {
        name: Set(params.name),
        division: Set(params.division),
        subdivision: Set(params.subdivision),
        wins: Set(0),
        losses: Set(0),
        draws: Set(0),
        points_for: Set(0),
        points_against: Set(0),
        points: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn get_team<C: ConnectionTrait>(
    conn: &C,
    team_id: i32,
) -> Result<Option<teams::Model>, DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

/// Teams of one subdivision in a stable order; schedule generation relies
/// on the ordering being deterministic across calls.
pub async fn list_teams<C: ConnectionTrait>(
    conn: &C,
    division: i32,
    subdivision: &str,
) -> Result<Vec<teams::Model>, DbErr> {
    teams::Entity::find()
        .filter(teams::Column::Division.eq(division))
        .filter(teams::Column::Subdivision.eq(subdivision))
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

/// Every (division, subdivision) pair that has at least one team.
pub async fn list_subdivisions<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<(i32, String)>, DbErr> {
    teams::Entity::find()
        .select_only()
        .column(teams::Column::Division)
        .column(teams::Column::Subdivision)
        .distinct()
        .order_by_asc(teams::Column::Division)
        .order_by_asc(teams::Column::Subdivision)
        .into_tuple()
        .all(conn)
        .await
}

/// Subdivision table ordered by points, then goal difference, then goals
/// scored, then id. Playoff seeding takes the top of this list.
pub async fn standings<C: ConnectionTrait>(
    conn: &C,
    division: i32,
    subdivision: &str,
) -> Result<Vec<teams::Model>, DbErr> {
    let mut teams = list_teams(conn, division, subdivision).await?;
    teams.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then((b.points_for - b.points_against).cmp(&(a.points_for - a.points_against)))
            .then(b.points_for.cmp(&a.points_for))
            .then(a.id.cmp(&b.id))
    });
    Ok(teams)
}

/// Replaces the cached record wholesale. The reconciler is the only caller
/// allowed to shrink any of these fields.
pub async fn overwrite_record<C: ConnectionTrait>(
    conn: &C,
    team: teams::Model,
    record: TeamRecord,
) -> Result<teams::Model, DbErr> {
    let mut active: teams::ActiveModel = team.into();
    active.wins = Set(record.wins);
    active.losses = Set(record.losses);
    active.draws = Set(record.draws);
    active.points_for = Set(record.points_for);
    active.points_against = Set(record.points_against);
    active.points = Set(record.points);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(conn).await
}
