use serde::Deserialize;

use crate::domains::sea_orm_active_enums::MatchStatus;

#[derive(Deserialize, Default)]
pub struct StandingsQuery {
    pub division: Option<i32>,
    pub subdivision: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct MatchQuery {
    pub season_day: Option<i32>,
    pub tournament_id: Option<String>,
    pub status: Option<MatchStatus>,
}
