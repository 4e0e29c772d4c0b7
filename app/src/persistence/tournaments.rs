use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use models::domains::sea_orm_active_enums::TournamentStatus;
use models::domains::{tournament_entries, tournaments};

const TOURNAMENT_ID_LENGTH: usize = 24;

/// Creates a tournament with its entries in seed order: the i-th team id
/// becomes seed i+1. Callers pass team ids already ranked.
pub async fn create_tournament<C: ConnectionTrait>(
    conn: &C,
    season_id: i32,
    division: i32,
    subdivision: &str,
    name: &str,
    seeded_team_ids: &[i32],
) -> Result<tournaments::Model, DbErr> {
    let id = nanoid::nanoid!(TOURNAMENT_ID_LENGTH, &super::ID_ALPHABET);
    let now = Utc::now().fixed_offset();

    let tournament = tournaments::ActiveModel {
        id: Set(id.clone()),
        season_id: Set(season_id),
        division: Set(division),
        subdivision: Set(subdivision.to_owned()),
        name: Set(name.to_owned()),
        status: Set(TournamentStatus::Pending),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    let entries = seeded_team_ids.iter().enumerate().map(|(i, team_id)| {
        tournament_entries::ActiveModel {
            tournament_id: Set(id.clone()),
            team_id: Set(*team_id),
            seed: Set(i as i32 + 1),
            registered_at: Set(now),
            ..Default::default()
        }
    });
    tournament_entries::Entity::insert_many(entries)
        .exec_without_returning(conn)
        .await?;

    Ok(tournament)
}

pub async fn find_tournament<C: ConnectionTrait>(
    conn: &C,
    tournament_id: &str,
) -> Result<Option<tournaments::Model>, DbErr> {
    tournaments::Entity::find_by_id(tournament_id).one(conn).await
}

/// Entries in seed order, seed 1 first.
pub async fn list_entries<C: ConnectionTrait>(
    conn: &C,
    tournament_id: &str,
) -> Result<Vec<tournament_entries::Model>, DbErr> {
    tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .order_by_asc(tournament_entries::Column::Seed)
        .all(conn)
        .await
}

/// The unique scope index means at most one row can match.
pub async fn find_for_scope<C: ConnectionTrait>(
    conn: &C,
    season_id: i32,
    division: i32,
    subdivision: &str,
) -> Result<Option<tournaments::Model>, DbErr> {
    tournaments::Entity::find()
        .filter(tournaments::Column::SeasonId.eq(season_id))
        .filter(tournaments::Column::Division.eq(division))
        .filter(tournaments::Column::Subdivision.eq(subdivision))
        .one(conn)
        .await
}

pub async fn list_for_season<C: ConnectionTrait>(
    conn: &C,
    season_id: i32,
) -> Result<Vec<tournaments::Model>, DbErr> {
    tournaments::Entity::find()
        .filter(tournaments::Column::SeasonId.eq(season_id))
        .order_by_asc(tournaments::Column::Division)
        .order_by_asc(tournaments::Column::Subdivision)
        .all(conn)
        .await
}

pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    tournament: tournaments::Model,
    status: TournamentStatus,
) -> Result<tournaments::Model, DbErr> {
    let mut active: tournaments::ActiveModel = tournament.into();
    active.status = Set(status);
    active.update(conn).await
}
