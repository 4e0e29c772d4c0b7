use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Season lifecycle phase. Stored as a plain string column so the same
/// migrations run on postgres and the sqlite test database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SeasonPhase {
    #[sea_orm(string_value = "regular_season")]
    RegularSeason,
    #[sea_orm(string_value = "playoffs")]
    Playoffs,
    #[sea_orm(string_value = "offseason")]
    Offseason,
}

impl SeasonPhase {
    /// The only phase this one may legally advance to. The cycle wraps:
    /// leaving the offseason starts the next season.
    pub fn next(self) -> SeasonPhase {
        match self {
            SeasonPhase::RegularSeason => SeasonPhase::Playoffs,
            SeasonPhase::Playoffs => SeasonPhase::Offseason,
            SeasonPhase::Offseason => SeasonPhase::RegularSeason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MatchStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TournamentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}
