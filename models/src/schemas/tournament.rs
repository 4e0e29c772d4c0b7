use sea_orm::prelude::DateTimeUtc;
use serde::Serialize;

use crate::domains::{
    sea_orm_active_enums::TournamentStatus, tournament_entries, tournaments,
};

#[derive(Serialize, Clone, Debug)]
pub struct TournamentEntrySchema {
    pub team_id: i32,
    pub seed: i32,
    pub registered_at: DateTimeUtc,
}

impl From<tournament_entries::Model> for TournamentEntrySchema {
    fn from(entry: tournament_entries::Model) -> Self {
        Self {
            team_id: entry.team_id,
            seed: entry.seed,
            registered_at: entry.registered_at.to_utc(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TournamentSchema {
    pub id: String,
    pub season_id: i32,
    pub division: i32,
    pub subdivision: String,
    pub name: String,
    pub status: TournamentStatus,
    pub created_at: DateTimeUtc,
    pub entries: Vec<TournamentEntrySchema>,
}

impl TournamentSchema {
    pub fn new(
        tournament: tournaments::Model,
        entries: Vec<tournament_entries::Model>,
    ) -> Self {
        Self {
            id: tournament.id,
            season_id: tournament.season_id,
            division: tournament.division,
            subdivision: tournament.subdivision,
            name: tournament.name,
            status: tournament.status,
            created_at: tournament.created_at.to_utc(),
            entries: entries.into_iter().map(From::from).collect(),
        }
    }
}
