use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use models::domains::sea_orm_active_enums::SeasonPhase;
use models::domains::seasons;

use crate::error::EngineError;

/// A new season always opens at day 1 of the regular season.
pub async fn create_season<C: ConnectionTrait>(
    conn: &C,
    number: i32,
    started_on: DateTime<FixedOffset>,
) -> Result<seasons::Model, DbErr> {
    seasons::ActiveModel {
        number: Set(number),
        current_day: Set(1),
        phase: Set(SeasonPhase::RegularSeason),
        started_on: Set(started_on),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn find_season<C: ConnectionTrait>(
    conn: &C,
    season_id: i32,
) -> Result<Option<seasons::Model>, DbErr> {
    seasons::Entity::find_by_id(season_id).one(conn).await
}

pub async fn find_by_number<C: ConnectionTrait>(
    conn: &C,
    number: i32,
) -> Result<Option<seasons::Model>, DbErr> {
    seasons::Entity::find()
        .filter(seasons::Column::Number.eq(number))
        .one(conn)
        .await
}

pub async fn current_season<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<seasons::Model>, DbErr> {
    seasons::Entity::find()
        .order_by_desc(seasons::Column::Number)
        .one(conn)
        .await
}

/// The current season, or a typed error when none has been bootstrapped.
pub async fn require_current<C: ConnectionTrait>(
    conn: &C,
) -> Result<seasons::Model, EngineError> {
    current_season(conn)
        .await?
        .ok_or(EngineError::NoCurrentSeason)
}

pub async fn set_phase<C: ConnectionTrait>(
    conn: &C,
    season: seasons::Model,
    phase: SeasonPhase,
) -> Result<seasons::Model, DbErr> {
    let mut active: seasons::ActiveModel = season.into();
    active.phase = Set(phase);
    active.update(conn).await
}

pub async fn set_day<C: ConnectionTrait>(
    conn: &C,
    season: seasons::Model,
    day: i32,
) -> Result<seasons::Model, DbErr> {
    let mut active: seasons::ActiveModel = season.into();
    active.current_day = Set(day);
    active.update(conn).await
}
