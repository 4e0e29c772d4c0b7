use sea_orm::prelude::DateTimeUtc;
use serde::Serialize;

use crate::domains::{matches, sea_orm_active_enums::MatchStatus};

#[derive(Serialize, Clone, Debug)]
pub struct FixtureSchema {
    pub id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub division: i32,
    pub subdivision: String,
    pub season_id: i32,
    pub season_day: Option<i32>,
    pub scheduled_at: DateTimeUtc,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub round: Option<i32>,
    pub bracket_slot: Option<i32>,
    pub tournament_id: Option<String>,
    pub simulated: bool,
}

impl From<matches::Model> for FixtureSchema {
    fn from(m: matches::Model) -> Self {
        Self {
            id: m.id,
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            division: m.division,
            subdivision: m.subdivision,
            season_id: m.season_id,
            season_day: m.season_day,
            scheduled_at: m.scheduled_at.to_utc(),
            status: m.status,
            home_score: m.home_score,
            away_score: m.away_score,
            round: m.round,
            bracket_slot: m.bracket_slot,
            tournament_id: m.tournament_id,
            simulated: m.simulated,
        }
    }
}
