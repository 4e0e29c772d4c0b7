use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::{DbConn, DbErr, Set, TransactionTrait};

use models::domains::sea_orm_active_enums::MatchStatus;
use models::domains::{matches, seasons};
use models::params::schedule::GenerateScheduleParams;
use models::schemas::outcome::ScheduleOutcome;

use crate::config::Config;
use crate::error::EngineError;
use crate::persistence;

/// Circle-method pairings for one day. Team 0 stays fixed while the other
/// N−1 rotate one position per day, so over any N−1 consecutive days every
/// unordered pair meets exactly once. Home and away flip with the parity of
/// `day` to balance venues across the season.
///
/// `team_ids` must be even-sized; callers validate the pool first.
pub fn round_robin_pairings(team_ids: &[i32], day: i32) -> Vec<(i32, i32)> {
    let n = team_ids.len();
    debug_assert!(n >= 2 && n % 2 == 0);

    let m = n - 1;
    let rotation = (day - 1).rem_euclid(m as i32) as usize;
    let position = |i: usize| -> i32 {
        if i == 0 {
            team_ids[0]
        } else {
            team_ids[1 + (i - 1 + rotation) % m]
        }
    };

    (0..n / 2)
        .map(|i| {
            let a = position(i);
            let b = position(n - 1 - i);
            if day % 2 == 0 { (b, a) } else { (a, b) }
        })
        .collect()
}

/// Kickoff for pair `slot` of `day`: the season's calendar date for that
/// day, at the configured base hour plus one slot interval per pair.
fn kickoff_time(
    season: &seasons::Model,
    config: &Config,
    day: i32,
    slot: usize,
) -> DateTime<FixedOffset> {
    let date = season.started_on.date_naive() + Duration::days((day - 1) as i64);
    let base = date
        .and_hms_opt(config.kickoff_base_hour.min(23), 0, 0)
        .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).expect("midnight exists"));
    (base + Duration::minutes(config.kickoff_slot_minutes * slot as i64))
        .and_utc()
        .fixed_offset()
}

/// Regenerates the full league calendar for one subdivision over a day
/// range. Existing league fixtures in the scope are cleared and the new
/// batch inserted in a single transaction, so re-running after a failure is
/// always safe and a partial schedule is never committed.
pub async fn generate_schedule(
    conn: &DbConn,
    config: &Config,
    season: &seasons::Model,
    params: &GenerateScheduleParams,
) -> Result<ScheduleOutcome, EngineError> {
    if params.first_day < 1 || params.last_day < params.first_day {
        return Err(EngineError::InvalidDayRange {
            first_day: params.first_day,
            last_day: params.last_day,
        });
    }

    let teams =
        persistence::teams::list_teams(conn, params.division, &params.subdivision).await?;
    if teams.len() != config.subdivision_size || teams.len() % 2 != 0 {
        return Err(EngineError::Configuration {
            division: params.division,
            subdivision: params.subdivision.clone(),
            expected: config.subdivision_size,
            actual: teams.len(),
        });
    }

    let team_ids: Vec<i32> = teams.iter().map(|t| t.id).collect();
    let now = Utc::now().fixed_offset();
    let mut fixtures = Vec::with_capacity(
        (params.last_day - params.first_day + 1) as usize * team_ids.len() / 2,
    );

    for day in params.first_day..=params.last_day {
        for (slot, (home, away)) in round_robin_pairings(&team_ids, day).into_iter().enumerate()
        {
            fixtures.push(matches::ActiveModel {
                home_team_id: Set(home),
                away_team_id: Set(away),
                division: Set(params.division),
                subdivision: Set(params.subdivision.clone()),
                season_id: Set(season.id),
                season_day: Set(Some(day)),
                scheduled_at: Set(kickoff_time(season, config, day, slot)),
                status: Set(MatchStatus::Scheduled),
                home_score: Set(None),
                away_score: Set(None),
                round: Set(None),
                bracket_slot: Set(None),
                tournament_id: Set(None),
                simulated: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            });
        }
    }

    let season_id = season.id;
    let division = params.division;
    let subdivision = params.subdivision.clone();
    let (first_day, last_day) = (params.first_day, params.last_day);

    let matches_created = conn
        .transaction::<_, u64, DbErr>(move |txn| {
            Box::pin(async move {
                let cleared = persistence::matches::clear_league_fixtures(
                    txn,
                    season_id,
                    division,
                    &subdivision,
                    first_day,
                    last_day,
                )
                .await?;
                if cleared > 0 {
                    tracing::info!(
                        cleared,
                        division,
                        subdivision = %subdivision,
                        "replacing existing fixtures"
                    );
                }
                persistence::matches::insert_many(txn, fixtures).await
            })
        })
        .await?;

    tracing::info!(
        matches_created,
        division = params.division,
        subdivision = %params.subdivision,
        first_day = params.first_day,
        last_day = params.last_day,
        "schedule generated"
    );

    Ok(ScheduleOutcome {
        matches_created,
        days_scheduled: (params.last_day - params.first_day + 1) as u64,
    })
}
