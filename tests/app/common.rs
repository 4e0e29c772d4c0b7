use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use app::config::Config;
use app::persistence::{matches, seasons, teams};
use models::domains::sea_orm_active_enums::MatchStatus;
use models::domains::{matches as match_domain, seasons as season_domain, teams as team_domain};
use models::params::team::CreateTeamParams;

use utils::testing::setup_test_db;

pub async fn setup() -> (DatabaseConnection, Config) {
    let conn = setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!");
    (conn, Config::for_tests())
}

pub async fn seed_teams(
    conn: &DatabaseConnection,
    division: i32,
    subdivision: &str,
    count: usize,
) -> Vec<team_domain::Model> {
    let mut seeded = Vec::with_capacity(count);
    for i in 1..=count {
        let team = teams::create_team(
            conn,
            CreateTeamParams {
                name: format!("{subdivision} United {i}"),
                division,
                subdivision: subdivision.to_string(),
            },
        )
        .await
        .expect("Create team failed!");
        seeded.push(team);
    }
    seeded
}

pub async fn bootstrap_season(conn: &DatabaseConnection) -> season_domain::Model {
    seasons::create_season(conn, 1, Utc::now().fixed_offset())
        .await
        .expect("Create season failed!")
}

pub struct FixtureSpec {
    pub home: i32,
    pub away: i32,
    pub status: MatchStatus,
    pub minutes_old: i64,
    pub scores: Option<(i32, i32)>,
    pub tournament_id: Option<String>,
    pub round: Option<i32>,
    pub bracket_slot: Option<i32>,
}

impl FixtureSpec {
    pub fn league(home: i32, away: i32) -> Self {
        Self {
            home,
            away,
            status: MatchStatus::Scheduled,
            minutes_old: 0,
            scores: None,
            tournament_id: None,
            round: None,
            bracket_slot: None,
        }
    }

    pub fn in_progress(mut self, minutes_old: i64) -> Self {
        self.status = MatchStatus::InProgress;
        self.minutes_old = minutes_old;
        self
    }

    pub fn completed(mut self, home_score: i32, away_score: i32) -> Self {
        self.status = MatchStatus::Completed;
        self.scores = Some((home_score, away_score));
        self
    }
}

pub async fn insert_fixture(
    conn: &DatabaseConnection,
    season_id: i32,
    spec: FixtureSpec,
) -> match_domain::Model {
    let created_at = (Utc::now() - Duration::minutes(spec.minutes_old)).fixed_offset();
    match_domain::ActiveModel {
        home_team_id: Set(spec.home),
        away_team_id: Set(spec.away),
        division: Set(1),
        subdivision: Set("north".to_string()),
        season_id: Set(season_id),
        season_day: Set(None),
        scheduled_at: Set(created_at),
        status: Set(spec.status),
        home_score: Set(spec.scores.map(|(h, _)| h)),
        away_score: Set(spec.scores.map(|(_, a)| a)),
        round: Set(spec.round),
        bracket_slot: Set(spec.bracket_slot),
        tournament_id: Set(spec.tournament_id),
        simulated: Set(false),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("Insert fixture failed!")
}

pub async fn force_complete(
    conn: &DatabaseConnection,
    fixture: match_domain::Model,
    home_score: i32,
    away_score: i32,
) -> match_domain::Model {
    matches::complete_match(conn, fixture, home_score, away_score, false)
        .await
        .expect("Complete match failed!")
}
