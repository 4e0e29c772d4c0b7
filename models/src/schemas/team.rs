use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

use crate::domains::teams;

/// A team's aggregate record. Cached on the team row; ground truth is the
/// fold over COMPLETED matches, which the reconciler recomputes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub points_for: i32,
    pub points_against: i32,
    pub points: i32,
}

impl TeamRecord {
    pub fn games_played(&self) -> i32 {
        self.wins + self.losses + self.draws
    }

    pub fn goal_difference(&self) -> i32 {
        self.points_for - self.points_against
    }
}

impl From<&teams::Model> for TeamRecord {
    fn from(team: &teams::Model) -> Self {
        Self {
            wins: team.wins,
            losses: team.losses,
            draws: team.draws,
            points_for: team.points_for,
            points_against: team.points_against,
            points: team.points,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TeamSchema {
    pub id: i32,
    pub name: String,
    pub division: i32,
    pub subdivision: String,
    pub record: TeamRecord,
    pub created_at: DateTimeUtc,
}

impl From<teams::Model> for TeamSchema {
    fn from(team: teams::Model) -> Self {
        Self {
            record: TeamRecord::from(&team),
            id: team.id,
            name: team.name,
            division: team.division,
            subdivision: team.subdivision,
            created_at: team.created_at.to_utc(),
        }
    }
}
