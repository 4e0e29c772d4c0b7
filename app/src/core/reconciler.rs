use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{DbConn, DbErr, TransactionTrait};

use models::domains::matches;
use models::schemas::outcome::{RepairDetail, RepairOutcome, ResyncOutcome};
use models::schemas::team::TeamRecord;

use crate::config::Config;
use crate::core::{POINTS_DRAW, POINTS_WIN};
use crate::error::EngineError;
use crate::persistence;

/// Recomputes a team's record purely from its COMPLETED matches. This fold
/// is the ground truth the cached team row must agree with.
pub fn fold_record(team_id: i32, completed: &[matches::Model]) -> TeamRecord {
    let mut record = TeamRecord::default();
    for m in completed {
        let (Some(home_score), Some(away_score)) = (m.home_score, m.away_score) else {
            continue;
        };
        let (scored, conceded) = if m.home_team_id == team_id {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        };
        record.points_for += scored;
        record.points_against += conceded;
        if scored > conceded {
            record.wins += 1;
            record.points += POINTS_WIN;
        } else if scored < conceded {
            record.losses += 1;
        } else {
            record.draws += 1;
            record.points += POINTS_DRAW;
        }
    }
    record
}

/// A plausible final score for an abandoned match, each side drawn
/// independently from the configured bounds. Bracket fixtures must produce
/// a winner, so level draws are re-rolled for them.
fn synthesize_score<R: Rng>(rng: &mut R, config: &Config, knockout: bool) -> (i32, i32) {
    let home = rng.random_range(config.score_min..=config.score_max);
    let mut away = rng.random_range(config.score_min..=config.score_max);
    while knockout && away == home {
        away = rng.random_range(config.score_min..=config.score_max);
    }
    (home, away)
}

/// Finds matches stuck IN_PROGRESS beyond the timeout and force-completes
/// each with a synthesized, `simulated`-flagged result, updating both team
/// records and the audit sink. One match failing to repair is logged and
/// reported in the details; it never blocks the rest of the pass.
pub async fn repair_stuck_matches(
    conn: &DbConn,
    config: &Config,
) -> Result<RepairOutcome, EngineError> {
    let cutoff = Utc::now() - Duration::minutes(config.stuck_match_timeout_minutes);
    let stuck = persistence::matches::find_stuck(conn, cutoff).await?;
    if stuck.is_empty() {
        return Ok(RepairOutcome {
            fixed_count: 0,
            details: Vec::new(),
        });
    }
    tracing::warn!(count = stuck.len(), "stuck matches found");

    let mut fixed_count = 0;
    let mut details = Vec::with_capacity(stuck.len());

    for fixture in stuck {
        let match_id = fixture.id;
        let stuck_minutes = (Utc::now() - fixture.created_at.to_utc()).num_minutes();
        let knockout = fixture.tournament_id.is_some();
        let (home_score, away_score) = synthesize_score(&mut rand::rng(), config, knockout);

        match repair_one(conn, fixture, home_score, away_score, stuck_minutes).await {
            Ok(note) => {
                fixed_count += 1;
                details.push(RepairDetail {
                    match_id,
                    repaired: true,
                    note,
                });
            }
            Err(err) => {
                tracing::warn!(match_id, error = %err, "failed to repair stuck match");
                details.push(RepairDetail {
                    match_id,
                    repaired: false,
                    note: err.to_string(),
                });
            }
        }
    }

    tracing::info!(fixed_count, "stuck match repair pass finished");
    Ok(RepairOutcome {
        fixed_count,
        details,
    })
}

async fn repair_one(
    conn: &DbConn,
    fixture: matches::Model,
    home_score: i32,
    away_score: i32,
    stuck_minutes: i64,
) -> Result<String, EngineError> {
    let note = format!(
        "match {} auto-completed after {} minutes stuck in progress; synthesized score {}-{}",
        fixture.id, stuck_minutes, home_score, away_score
    );

    let audit_note = note.clone();
    conn.transaction::<_, (), DbErr>(move |txn| {
        Box::pin(async move {
            let home_id = fixture.home_team_id;
            let away_id = fixture.away_team_id;
            persistence::matches::complete_match(txn, fixture, home_score, away_score, true)
                .await?;
            apply_result_to_team(txn, home_id, home_score, away_score).await?;
            apply_result_to_team(txn, away_id, away_score, home_score).await?;
            persistence::audit::record(txn, "repair", audit_note).await?;
            Ok(())
        })
    })
    .await?;

    Ok(note)
}

/// Folds one result into a team's cached record. Incremental on purpose:
/// the resync pass recomputes from scratch whenever this cache drifts.
async fn apply_result_to_team<C: sea_orm::ConnectionTrait>(
    conn: &C,
    team_id: i32,
    scored: i32,
    conceded: i32,
) -> Result<(), DbErr> {
    let team = persistence::teams::get_team(conn, team_id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("team {team_id}")))?;

    let mut record = TeamRecord::from(&team);
    record.points_for += scored;
    record.points_against += conceded;
    if scored > conceded {
        record.wins += 1;
        record.points += POINTS_WIN;
    } else if scored < conceded {
        record.losses += 1;
    } else {
        record.draws += 1;
        record.points += POINTS_DRAW;
    }

    persistence::teams::overwrite_record(conn, team, record).await?;
    Ok(())
}

/// Recomputes a team's record from the match log and overwrites the cached
/// copy when any field drifted. Runs on a point-in-time read: a match
/// completing mid-scan is picked up by the next pass.
pub async fn resync_team_statistics(
    conn: &DbConn,
    team_id: i32,
) -> Result<ResyncOutcome, EngineError> {
    let team = persistence::teams::get_team(conn, team_id)
        .await?
        .ok_or(EngineError::TeamNotFound(team_id))?;

    let before = TeamRecord::from(&team);
    let completed = persistence::matches::list_completed_for_team(conn, team_id).await?;
    let after = fold_record(team_id, &completed);
    let discrepancies_found = before != after;

    if discrepancies_found {
        tracing::warn!(team_id, ?before, ?after, "team record drifted, resyncing");
        persistence::teams::overwrite_record(conn, team, after).await?;
        persistence::audit::record(
            conn,
            "resync",
            format!(
                "team {team_id} record resynced from {} completed matches: {before:?} -> {after:?}",
                completed.len()
            ),
        )
        .await?;
    }

    Ok(ResyncOutcome {
        team_id,
        before,
        after,
        matches_processed: completed.len() as u64,
        discrepancies_found,
    })
}
