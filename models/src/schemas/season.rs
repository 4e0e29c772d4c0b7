use sea_orm::prelude::DateTimeUtc;
use serde::Serialize;

use crate::domains::{sea_orm_active_enums::SeasonPhase, seasons};

#[derive(Serialize, Clone, Debug)]
pub struct SeasonSchema {
    pub id: i32,
    pub number: i32,
    pub current_day: i32,
    pub phase: SeasonPhase,
    pub started_on: DateTimeUtc,
}

impl From<seasons::Model> for SeasonSchema {
    fn from(season: seasons::Model) -> Self {
        Self {
            id: season.id,
            number: season.number,
            current_day: season.current_day,
            phase: season.phase,
            started_on: season.started_on.to_utc(),
        }
    }
}
