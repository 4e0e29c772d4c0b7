use models::domains::sea_orm_active_enums::SeasonPhase;
use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

/// Typed failures of the competition engine. Configuration and bracket-size
/// errors are not retryable; persistence failures are, because every
/// generation operation is idempotent at its scope.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "subdivision {division}/{subdivision} has {actual} teams, expected {expected}"
    )]
    Configuration {
        division: i32,
        subdivision: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid schedule day range {first_day}..={last_day}")]
    InvalidDayRange { first_day: i32, last_day: i32 },

    #[error("tournament {tournament_id} has {actual} entries, expected {expected}")]
    InvalidBracketSize {
        tournament_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("season {season_id} cannot move from {current:?} to {requested:?}")]
    InvalidPhaseTransition {
        season_id: i32,
        current: SeasonPhase,
        requested: SeasonPhase,
    },

    #[error("season {0} not found")]
    SeasonNotFound(i32),

    #[error("no season has been created yet")]
    NoCurrentSeason,

    #[error("tournament {0} not found")]
    TournamentNotFound(String),

    #[error("team {0} not found")]
    TeamNotFound(i32),

    #[error("match {0} not found")]
    MatchNotFound(i32),

    #[error(transparent)]
    Persistence(#[from] DbErr),
}

impl From<TransactionError<EngineError>> for EngineError {
    fn from(err: TransactionError<EngineError>) -> Self {
        match err {
            TransactionError::Connection(e) => EngineError::Persistence(e),
            TransactionError::Transaction(e) => e,
        }
    }
}

impl From<TransactionError<DbErr>> for EngineError {
    fn from(err: TransactionError<DbErr>) -> Self {
        match err {
            TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                EngineError::Persistence(e)
            }
        }
    }
}
