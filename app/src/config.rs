use std::{ops::Deref, str::FromStr, sync::Arc};

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,

    /// Number of teams in every subdivision. Must be even; schedule
    /// generation refuses a pool of any other size.
    pub subdivision_size: usize,
    /// Entries required by a playoff bracket.
    pub bracket_size: usize,
    pub regular_season_days: i32,
    pub offseason_days: i32,

    /// Kickoff of the first match of a day, UTC hour.
    pub kickoff_base_hour: u32,
    /// Gap between consecutive kickoff slots within one day.
    pub kickoff_slot_minutes: i64,
    pub bracket_kickoff_offset_minutes: i64,

    /// An IN_PROGRESS match older than this is considered stuck.
    pub stuck_match_timeout_minutes: i64,
    /// Bounds for synthesized repair scores, inclusive.
    pub score_min: i32,
    pub score_max: i32,

    pub repair_interval_secs: u64,
    pub day_tick_interval_secs: u64,
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} is not a valid value")),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok();

        let v = ConfigInner {
            db_url: std::env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file"),
            host: std::env::var("HOST").expect("HOST is not set in .env file"),
            port: std::env::var("PORT")
                .expect("PORT is not set in .env file")
                .parse()
                .expect("PORT is not a number"),
            allowed_origin: std::env::var("ALLOWED_ORIGIN")
                .expect("ALLOWED_ORIGIN is not set in .env file"),
            subdivision_size: env_or("SUBDIVISION_SIZE", 8),
            bracket_size: env_or("BRACKET_SIZE", 8),
            regular_season_days: env_or("REGULAR_SEASON_DAYS", 14),
            offseason_days: env_or("OFFSEASON_DAYS", 7),
            kickoff_base_hour: env_or("KICKOFF_BASE_HOUR", 18),
            kickoff_slot_minutes: env_or("KICKOFF_SLOT_MINUTES", 15),
            bracket_kickoff_offset_minutes: env_or("BRACKET_KICKOFF_OFFSET_MINUTES", 5),
            stuck_match_timeout_minutes: env_or("STUCK_MATCH_TIMEOUT_MINUTES", 30),
            score_min: env_or("REPAIR_SCORE_MIN", 1),
            score_max: env_or("REPAIR_SCORE_MAX", 4),
            repair_interval_secs: env_or("REPAIR_INTERVAL_SECS", 300),
            day_tick_interval_secs: env_or("DAY_TICK_INTERVAL_SECS", 86400),
        };

        Self(Arc::new(v))
    }

    /// Fixed values with an in-memory placeholder database, for tests that
    /// never touch `db_url`.
    pub fn for_tests() -> Config {
        Self(Arc::new(ConfigInner {
            db_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            allowed_origin: "http://localhost".into(),
            subdivision_size: 8,
            bracket_size: 8,
            regular_season_days: 14,
            offseason_days: 7,
            kickoff_base_hour: 18,
            kickoff_slot_minutes: 15,
            bracket_kickoff_offset_minutes: 5,
            stuck_match_timeout_minutes: 30,
            score_min: 1,
            score_max: 4,
            repair_interval_secs: 300,
            day_tick_interval_secs: 86400,
        }))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
