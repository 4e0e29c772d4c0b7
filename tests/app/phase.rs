use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use app::core::bracket::advance_bracket_round;
use app::core::phase::{advance_phase, tick_day};
use app::error::EngineError;
use app::persistence::{matches, seasons, tournaments};
use models::domains::matches as match_domain;
use models::domains::sea_orm_active_enums::{SeasonPhase, TournamentStatus};
use models::domains::seasons as season_domain;

use crate::common::{bootstrap_season, force_complete, seed_teams, setup};

#[tokio::test]
async fn skipping_a_phase_fails_and_leaves_state() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    let err = advance_phase(&conn, &config, season.id, SeasonPhase::Offseason)
        .await
        .expect_err("Expected invalid transition");
    assert!(matches!(err, EngineError::InvalidPhaseTransition { .. }));

    let season = seasons::find_season(&conn, season.id).await.unwrap().unwrap();
    assert_eq!(season.phase, SeasonPhase::RegularSeason);
    assert_eq!(season.current_day, 1);
}

#[tokio::test]
async fn requesting_the_current_phase_is_a_no_op() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    let outcome = advance_phase(&conn, &config, season.id, SeasonPhase::RegularSeason)
        .await
        .expect("No-op advance failed!");
    assert_eq!(outcome.phase, SeasonPhase::RegularSeason);
    assert_eq!(outcome.season_id, season.id);
}

#[tokio::test]
async fn playoffs_create_one_seeded_bracket_per_scope() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    seed_teams(&conn, 2, "south", 8).await;
    let season = bootstrap_season(&conn).await;

    let outcome = advance_phase(&conn, &config, season.id, SeasonPhase::Playoffs)
        .await
        .expect("Advance to playoffs failed!");
    assert_eq!(outcome.phase, SeasonPhase::Playoffs);

    let brackets = tournaments::list_for_season(&conn, season.id).await.unwrap();
    assert_eq!(brackets.len(), 2);
    for tournament in &brackets {
        let entries = tournaments::list_entries(&conn, &tournament.id).await.unwrap();
        assert_eq!(entries.len(), 8);
        let round_one = matches::list_for_tournament(&conn, &tournament.id)
            .await
            .unwrap();
        assert_eq!(round_one.len(), 4);
    }

    // Retrying the transition must not duplicate tournaments or matches.
    advance_phase(&conn, &config, season.id, SeasonPhase::Playoffs)
        .await
        .expect("Retried advance failed!");
    let brackets = tournaments::list_for_season(&conn, season.id).await.unwrap();
    assert_eq!(brackets.len(), 2);
    let total = match_domain::Entity::find().count(&conn).await.unwrap();
    assert_eq!(total, 8);
}

async fn finish_all_brackets(
    conn: &sea_orm::DatabaseConnection,
    config: &app::config::Config,
    season_id: i32,
) {
    loop {
        let pending: Vec<_> = tournaments::list_for_season(conn, season_id)
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.status != TournamentStatus::Completed)
            .collect();
        if pending.is_empty() {
            break;
        }
        for tournament in pending {
            let open: Vec<_> = matches::list_for_tournament(conn, &tournament.id)
                .await
                .unwrap()
                .into_iter()
                .filter(|m| m.home_score.is_none())
                .collect();
            for fixture in open {
                force_complete(conn, fixture, 2, 1).await;
            }
            advance_bracket_round(conn, config, &tournament.id)
                .await
                .expect("Advance bracket failed!");
        }
    }
}

#[tokio::test]
async fn full_season_cycle_rolls_into_season_two() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    advance_phase(&conn, &config, season.id, SeasonPhase::Playoffs)
        .await
        .expect("Advance to playoffs failed!");

    // Playoffs unfinished: the season cannot close yet.
    let err = advance_phase(&conn, &config, season.id, SeasonPhase::Offseason)
        .await
        .expect_err("Expected invalid transition");
    assert!(matches!(err, EngineError::InvalidPhaseTransition { .. }));

    finish_all_brackets(&conn, &config, season.id).await;
    let outcome = advance_phase(&conn, &config, season.id, SeasonPhase::Offseason)
        .await
        .expect("Advance to offseason failed!");
    assert_eq!(outcome.phase, SeasonPhase::Offseason);

    let outcome = advance_phase(&conn, &config, season.id, SeasonPhase::RegularSeason)
        .await
        .expect("Rollover failed!");
    assert_eq!(outcome.phase, SeasonPhase::RegularSeason);
    assert_ne!(outcome.season_id, season.id);

    let next = seasons::find_season(&conn, outcome.season_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.number, 2);
    assert_eq!(next.current_day, 1);
    assert_eq!(next.phase, SeasonPhase::RegularSeason);

    // A fresh regular-season calendar exists for the new season.
    let fixtures = match_domain::Entity::find()
        .filter(match_domain::Column::SeasonId.eq(next.id))
        .count(&conn)
        .await
        .unwrap();
    assert_eq!(
        fixtures,
        (config.regular_season_days as u64) * 4
    );

    // A retried rollover resolves to the same season.
    let retried = advance_phase(&conn, &config, season.id, SeasonPhase::RegularSeason)
        .await
        .expect("Retried rollover failed!");
    assert_eq!(retried.season_id, next.id);
    let seasons_total = season_domain::Entity::find().count(&conn).await.unwrap();
    assert_eq!(seasons_total, 2);
}

#[tokio::test]
async fn day_tick_crossing_the_threshold_starts_playoffs() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;
    let season = seasons::set_day(&conn, season, config.regular_season_days)
        .await
        .unwrap();

    let outcome = tick_day(&conn, &config, season.id)
        .await
        .expect("Tick failed!");
    assert_eq!(outcome.phase, SeasonPhase::Playoffs);

    let season = seasons::find_season(&conn, season.id).await.unwrap().unwrap();
    assert_eq!(season.current_day, config.regular_season_days + 1);
}

#[tokio::test]
async fn day_ticks_carry_playoffs_into_the_next_season() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;
    let season = seasons::set_day(&conn, season, config.regular_season_days)
        .await
        .unwrap();

    let outcome = tick_day(&conn, &config, season.id)
        .await
        .expect("Tick into playoffs failed!");
    assert_eq!(outcome.phase, SeasonPhase::Playoffs);

    // Three bracket rounds for 8 entries. Results land between ticks; each
    // tick then carries the bracket one round forward, and the tick after
    // the final closes the season.
    let mut outcome = outcome;
    for _ in 0..3 {
        let brackets = tournaments::list_for_season(&conn, season.id).await.unwrap();
        for tournament in brackets {
            let open: Vec<_> = matches::list_for_tournament(&conn, &tournament.id)
                .await
                .unwrap()
                .into_iter()
                .filter(|m| m.home_score.is_none())
                .collect();
            for fixture in open {
                force_complete(&conn, fixture, 2, 0).await;
            }
        }
        outcome = tick_day(&conn, &config, season.id)
            .await
            .expect("Playoff tick failed!");
    }
    assert_eq!(outcome.phase, SeasonPhase::Offseason);
    for tournament in tournaments::list_for_season(&conn, season.id).await.unwrap() {
        assert_eq!(tournament.status, TournamentStatus::Completed);
    }

    // Day is now regular_season_days + 4; the offseason runs until the
    // counter passes regular_season_days + offseason_days.
    for _ in 0..3 {
        let idle = tick_day(&conn, &config, season.id)
            .await
            .expect("Offseason tick failed!");
        assert_eq!(idle.phase, SeasonPhase::Offseason);
        assert_eq!(idle.season_id, season.id);
    }

    let rolled = tick_day(&conn, &config, season.id)
        .await
        .expect("Rollover tick failed!");
    assert_eq!(rolled.phase, SeasonPhase::RegularSeason);
    assert_ne!(rolled.season_id, season.id);

    let next = seasons::find_season(&conn, rolled.season_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.number, 2);
    assert_eq!(next.current_day, 1);
    let fixtures = match_domain::Entity::find()
        .filter(match_domain::Column::SeasonId.eq(next.id))
        .count(&conn)
        .await
        .unwrap();
    assert_eq!(fixtures, (config.regular_season_days as u64) * 4);
}

#[tokio::test]
async fn current_season_lookup_before_bootstrap_is_a_typed_error() {
    let (conn, _config) = setup().await;

    let err = seasons::require_current(&conn)
        .await
        .expect_err("Expected missing season error");
    assert!(matches!(err, EngineError::NoCurrentSeason));
    assert_eq!(err.to_string(), "no season has been created yet");

    bootstrap_season(&conn).await;
    let season = seasons::require_current(&conn)
        .await
        .expect("Require current failed!");
    assert_eq!(season.number, 1);
}
