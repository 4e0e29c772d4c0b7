use chrono::Utc;
use sea_orm::{DbConn, TransactionTrait};

use models::domains::sea_orm_active_enums::{SeasonPhase, TournamentStatus};
use models::domains::{seasons, tournaments};
use models::params::schedule::GenerateScheduleParams;
use models::schemas::outcome::PhaseOutcome;

use crate::config::Config;
use crate::core::{bracket, schedule};
use crate::error::EngineError;
use crate::persistence;

/// Moves a season to `target`. Only the immediate next phase in
/// REGULAR_SEASON → PLAYOFFS → OFFSEASON → (new season) REGULAR_SEASON is
/// legal; requesting the current phase again is an idempotent no-op, so a
/// crashed transition can simply be retried. Every generation step fired
/// here is itself idempotent.
pub async fn advance_phase(
    conn: &DbConn,
    config: &Config,
    season_id: i32,
    target: SeasonPhase,
) -> Result<PhaseOutcome, EngineError> {
    let season = persistence::seasons::find_season(conn, season_id)
        .await?
        .ok_or(EngineError::SeasonNotFound(season_id))?;

    if target == season.phase {
        return Ok(PhaseOutcome {
            season_id: season.id,
            phase: season.phase,
        });
    }
    if target != season.phase.next() {
        return Err(EngineError::InvalidPhaseTransition {
            season_id,
            current: season.phase,
            requested: target,
        });
    }

    match target {
        SeasonPhase::Playoffs => start_playoffs(conn, config, season).await,
        SeasonPhase::Offseason => close_season(conn, season).await,
        SeasonPhase::RegularSeason => roll_next_season(conn, config, season).await,
    }
}

/// Creates and seeds one playoff tournament per subdivision, then builds
/// its round-1 bracket. A scope that already has its tournament is reused,
/// so a retried transition cannot duplicate brackets.
async fn start_playoffs(
    conn: &DbConn,
    config: &Config,
    season: seasons::Model,
) -> Result<PhaseOutcome, EngineError> {
    for (division, subdivision) in persistence::teams::list_subdivisions(conn).await? {
        let tournament =
            playoff_tournament(conn, config, &season, division, &subdivision).await?;
        bracket::generate_bracket(conn, config, &tournament.id).await?;
    }

    let season_number = season.number;
    let updated = persistence::seasons::set_phase(conn, season, SeasonPhase::Playoffs).await?;
    persistence::audit::record(
        conn,
        "phase",
        format!("season {season_number} entered playoffs"),
    )
    .await?;
    tracing::info!(season_number, "playoffs started");

    Ok(PhaseOutcome {
        season_id: updated.id,
        phase: updated.phase,
    })
}

async fn playoff_tournament(
    conn: &DbConn,
    config: &Config,
    season: &seasons::Model,
    division: i32,
    subdivision: &str,
) -> Result<tournaments::Model, EngineError> {
    if let Some(existing) =
        persistence::tournaments::find_for_scope(conn, season.id, division, subdivision).await?
    {
        return Ok(existing);
    }

    let table = persistence::teams::standings(conn, division, subdivision).await?;
    if table.len() < config.bracket_size {
        return Err(EngineError::Configuration {
            division,
            subdivision: subdivision.to_owned(),
            expected: config.bracket_size,
            actual: table.len(),
        });
    }
    let seeded: Vec<i32> = table
        .iter()
        .take(config.bracket_size)
        .map(|t| t.id)
        .collect();

    let name = format!(
        "Season {} Division {division} {subdivision} Playoffs",
        season.number
    );
    let season_id = season.id;
    let subdivision = subdivision.to_owned();
    let tournament = conn
        .transaction::<_, tournaments::Model, EngineError>(move |txn| {
            Box::pin(async move {
                persistence::tournaments::create_tournament(
                    txn,
                    season_id,
                    division,
                    &subdivision,
                    &name,
                    &seeded,
                )
                .await
                .map_err(EngineError::from)
            })
        })
        .await?;

    Ok(tournament)
}

/// PLAYOFFS → OFFSEASON requires every bracket final to be decided.
async fn close_season(
    conn: &DbConn,
    season: seasons::Model,
) -> Result<PhaseOutcome, EngineError> {
    let tournaments = persistence::tournaments::list_for_season(conn, season.id).await?;
    let unfinished = tournaments
        .iter()
        .any(|t| t.status != TournamentStatus::Completed);
    if tournaments.is_empty() || unfinished {
        return Err(EngineError::InvalidPhaseTransition {
            season_id: season.id,
            current: season.phase,
            requested: SeasonPhase::Offseason,
        });
    }

    let season_number = season.number;
    let updated = persistence::seasons::set_phase(conn, season, SeasonPhase::Offseason).await?;
    persistence::audit::record(
        conn,
        "phase",
        format!("season {season_number} closed, offseason begins"),
    )
    .await?;
    tracing::info!(season_number, "season closed");

    Ok(PhaseOutcome {
        season_id: updated.id,
        phase: updated.phase,
    })
}

/// OFFSEASON → REGULAR_SEASON of the next season: a fresh season row at
/// day 1 plus a full schedule for every subdivision. The unique season
/// number is the rollover guard: if the next season already exists the
/// call returns it unchanged.
async fn roll_next_season(
    conn: &DbConn,
    config: &Config,
    season: seasons::Model,
) -> Result<PhaseOutcome, EngineError> {
    if let Some(next) = persistence::seasons::find_by_number(conn, season.number + 1).await? {
        return Ok(PhaseOutcome {
            season_id: next.id,
            phase: next.phase,
        });
    }

    let next = persistence::seasons::create_season(
        conn,
        season.number + 1,
        Utc::now().fixed_offset(),
    )
    .await?;

    for (division, subdivision) in persistence::teams::list_subdivisions(conn).await? {
        let params = GenerateScheduleParams {
            division,
            subdivision,
            first_day: 1,
            last_day: config.regular_season_days,
        };
        schedule::generate_schedule(conn, config, &next, &params).await?;
    }

    persistence::audit::record(conn, "phase", format!("season {} started", next.number))
        .await?;
    tracing::info!(season_number = next.number, "new season started");

    Ok(PhaseOutcome {
        season_id: next.id,
        phase: next.phase,
    })
}

/// Timer entry point: advances the day counter and fires whichever phase
/// transition the new day calls for. Safe to invoke redundantly; each
/// transition and generation step is idempotent on its own.
pub async fn tick_day(
    conn: &DbConn,
    config: &Config,
    season_id: i32,
) -> Result<PhaseOutcome, EngineError> {
    let season = persistence::seasons::find_season(conn, season_id)
        .await?
        .ok_or(EngineError::SeasonNotFound(season_id))?;

    let day = season.current_day + 1;
    let phase = season.phase;
    let number = season.number;
    let season = persistence::seasons::set_day(conn, season, day).await?;
    tracing::debug!(season_number = number, day, "day advanced");

    match phase {
        SeasonPhase::RegularSeason if day > config.regular_season_days => {
            advance_phase(conn, config, season.id, SeasonPhase::Playoffs).await
        }
        SeasonPhase::Playoffs => {
            for tournament in
                persistence::tournaments::list_for_season(conn, season.id).await?
            {
                bracket::advance_bracket_round(conn, config, &tournament.id).await?;
            }
            let all_done = persistence::tournaments::list_for_season(conn, season.id)
                .await?
                .iter()
                .all(|t| t.status == TournamentStatus::Completed);
            if all_done {
                advance_phase(conn, config, season.id, SeasonPhase::Offseason).await
            } else {
                Ok(PhaseOutcome {
                    season_id: season.id,
                    phase,
                })
            }
        }
        SeasonPhase::Offseason
            if day > config.regular_season_days + config.offseason_days =>
        {
            advance_phase(conn, config, season.id, SeasonPhase::RegularSeason).await
        }
        _ => Ok(PhaseOutcome {
            season_id: season.id,
            phase,
        }),
    }
}
