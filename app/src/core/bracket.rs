use chrono::{Duration, Utc};
use sea_orm::{DbConn, DbErr, Set, TransactionTrait};

use models::domains::sea_orm_active_enums::{MatchStatus, TournamentStatus};
use models::domains::{matches, tournaments};
use models::schemas::outcome::BracketOutcome;

use crate::config::Config;
use crate::error::EngineError;
use crate::persistence;

/// Seed layout of round 1 in bracket order, built by the standard doubling
/// rule. For 8 entries: [1, 8, 4, 5, 2, 7, 3, 6] — consecutive pairs are
/// the round-1 matches (1,8), (4,5), (2,7), (3,6), which keeps seeds 1 and
/// 2 on opposite halves of the tree.
pub fn seeding_order(size: usize) -> Vec<usize> {
    debug_assert!(size.is_power_of_two());
    let mut order = vec![1usize];
    while order.len() < size {
        let next_len = order.len() * 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, next_len + 1 - seed])
            .collect();
    }
    order
}

/// Materializes round 1 of a tournament's bracket. A tournament whose
/// matches already exist is left untouched and reported as success with
/// zero matches created; bracket construction never runs twice.
pub async fn generate_bracket(
    conn: &DbConn,
    config: &Config,
    tournament_id: &str,
) -> Result<BracketOutcome, EngineError> {
    let tournament = persistence::tournaments::find_tournament(conn, tournament_id)
        .await?
        .ok_or_else(|| EngineError::TournamentNotFound(tournament_id.to_owned()))?;

    let existing = persistence::matches::count_for_tournament(conn, tournament_id).await?;
    if existing > 0 {
        tracing::debug!(tournament_id, existing, "bracket already generated");
        return Ok(BracketOutcome { matches_created: 0 });
    }

    let entries = persistence::tournaments::list_entries(conn, tournament_id).await?;
    if entries.len() != config.bracket_size || !entries.len().is_power_of_two() {
        return Err(EngineError::InvalidBracketSize {
            tournament_id: tournament_id.to_owned(),
            expected: config.bracket_size,
            actual: entries.len(),
        });
    }

    // Entries arrive in seed order; seed s is entries[s - 1].
    let now = Utc::now().fixed_offset();
    let kickoff = now + Duration::minutes(config.bracket_kickoff_offset_minutes);
    let order = seeding_order(entries.len());

    let fixtures: Vec<matches::ActiveModel> = order
        .chunks(2)
        .enumerate()
        .map(|(slot, pair)| {
            let home = &entries[pair[0] - 1];
            let away = &entries[pair[1] - 1];
            matches::ActiveModel {
                home_team_id: Set(home.team_id),
                away_team_id: Set(away.team_id),
                division: Set(tournament.division),
                subdivision: Set(tournament.subdivision.clone()),
                season_id: Set(tournament.season_id),
                season_day: Set(None),
                scheduled_at: Set(kickoff),
                status: Set(MatchStatus::Scheduled),
                home_score: Set(None),
                away_score: Set(None),
                round: Set(Some(1)),
                bracket_slot: Set(Some(slot as i32)),
                tournament_id: Set(Some(tournament.id.clone())),
                simulated: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        })
        .collect();

    let tournament_for_txn = tournament.clone();
    let matches_created = conn
        .transaction::<_, u64, DbErr>(move |txn| {
            Box::pin(async move {
                let created = persistence::matches::insert_many(txn, fixtures).await?;
                persistence::tournaments::set_status(
                    txn,
                    tournament_for_txn,
                    TournamentStatus::InProgress,
                )
                .await?;
                Ok(created)
            })
        })
        .await?;

    persistence::audit::record(
        conn,
        "bracket",
        format!(
            "bracket generated for tournament {} ({} round-1 matches)",
            tournament.id, matches_created
        ),
    )
    .await?;

    tracing::info!(tournament_id, matches_created, "bracket generated");

    Ok(BracketOutcome { matches_created })
}

/// Advances a bracket by one round once the current round is fully
/// COMPLETED: the winner of slot 2k meets the winner of slot 2k+1 in slot k
/// of the next round. Completing the final marks the tournament COMPLETED
/// instead. Returns the number of matches created.
pub async fn advance_bracket_round(
    conn: &DbConn,
    config: &Config,
    tournament_id: &str,
) -> Result<u64, EngineError> {
    let tournament = persistence::tournaments::find_tournament(conn, tournament_id)
        .await?
        .ok_or_else(|| EngineError::TournamentNotFound(tournament_id.to_owned()))?;

    if tournament.status == TournamentStatus::Completed {
        return Ok(0);
    }

    let all = persistence::matches::list_for_tournament(conn, tournament_id).await?;
    let Some(current_round) = all.iter().filter_map(|m| m.round).max() else {
        return Ok(0);
    };

    let mut round_matches: Vec<&matches::Model> = all
        .iter()
        .filter(|m| m.round == Some(current_round))
        .collect();
    if round_matches
        .iter()
        .any(|m| m.status != MatchStatus::Completed)
    {
        return Ok(0);
    }
    round_matches.sort_by_key(|m| m.bracket_slot);

    if round_matches.len() == 1 {
        persistence::tournaments::set_status(conn, tournament.clone(), TournamentStatus::Completed)
            .await?;
        persistence::audit::record(
            conn,
            "bracket",
            format!("tournament {} final completed", tournament.id),
        )
        .await?;
        tracing::info!(tournament_id, "tournament completed");
        return Ok(0);
    }

    let winners: Vec<i32> = round_matches.iter().map(|&m| winner_of(m)).collect();

    let now = Utc::now().fixed_offset();
    let kickoff = now + Duration::minutes(config.bracket_kickoff_offset_minutes);
    let fixtures: Vec<matches::ActiveModel> = winners
        .chunks(2)
        .enumerate()
        .map(|(slot, pair)| matches::ActiveModel {
            home_team_id: Set(pair[0]),
            away_team_id: Set(pair[1]),
            division: Set(tournament.division),
            subdivision: Set(tournament.subdivision.clone()),
            season_id: Set(tournament.season_id),
            season_day: Set(None),
            scheduled_at: Set(kickoff),
            status: Set(MatchStatus::Scheduled),
            home_score: Set(None),
            away_score: Set(None),
            round: Set(Some(current_round + 1)),
            bracket_slot: Set(Some(slot as i32)),
            tournament_id: Set(Some(tournament.id.clone())),
            simulated: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .collect();

    let created = conn
        .transaction::<_, u64, DbErr>(move |txn| {
            Box::pin(async move { persistence::matches::insert_many(txn, fixtures).await })
        })
        .await?;

    tracing::info!(
        tournament_id,
        round = current_round + 1,
        created,
        "bracket round advanced"
    );

    Ok(created)
}

/// Knockout matches always have a winner: repair re-rolls level scores for
/// bracket fixtures and normal play settles them before completion. The
/// home side is kept only as a last-resort tie rule.
fn winner_of(m: &matches::Model) -> i32 {
    let home = m.home_score.unwrap_or(0);
    let away = m.away_score.unwrap_or(0);
    if away > home {
        m.away_team_id
    } else {
        m.home_team_id
    }
}
