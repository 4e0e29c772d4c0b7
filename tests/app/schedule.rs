use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use app::core::schedule::generate_schedule;
use app::error::EngineError;
use models::domains::matches;
use models::params::schedule::GenerateScheduleParams;

use crate::common::{bootstrap_season, seed_teams, setup};

fn north_params(first_day: i32, last_day: i32) -> GenerateScheduleParams {
    GenerateScheduleParams {
        division: 1,
        subdivision: "north".to_string(),
        first_day,
        last_day,
    }
}

#[tokio::test]
async fn eight_teams_over_ten_days() {
    let (conn, config) = setup().await;
    let teams = seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    let outcome = generate_schedule(&conn, &config, &season, &north_params(5, 14))
        .await
        .expect("Generate schedule failed!");
    assert_eq!(outcome.matches_created, 40);
    assert_eq!(outcome.days_scheduled, 10);

    let fixtures = matches::Entity::find().all(&conn).await.unwrap();
    assert_eq!(fixtures.len(), 40);

    let mut appearances: HashMap<i32, u32> = HashMap::new();
    let mut per_day: HashMap<i32, Vec<&matches::Model>> = HashMap::new();
    for fixture in &fixtures {
        *appearances.entry(fixture.home_team_id).or_default() += 1;
        *appearances.entry(fixture.away_team_id).or_default() += 1;
        per_day
            .entry(fixture.season_day.expect("league fixture has a day"))
            .or_default()
            .push(fixture);
    }

    // 10 distinct days, 4 matches each, every team exactly once per day.
    assert_eq!(per_day.len(), 10);
    for (day, day_fixtures) in &per_day {
        assert!((5..=14).contains(day));
        assert_eq!(day_fixtures.len(), 4);
    }
    assert_eq!(appearances.len(), teams.len());
    assert!(appearances.values().all(|&n| n == 10));
}

#[tokio::test]
async fn kickoffs_use_fixed_slots() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    generate_schedule(&conn, &config, &season, &north_params(3, 3))
        .await
        .expect("Generate schedule failed!");

    let mut kickoffs: Vec<_> = matches::Entity::find()
        .all(&conn)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.scheduled_at)
        .collect();
    kickoffs.sort();

    assert_eq!(kickoffs.len(), 4);
    for pair in kickoffs.windows(2) {
        let gap = pair[1] - pair[0];
        assert_eq!(gap.num_minutes(), config.kickoff_slot_minutes);
    }
}

#[tokio::test]
async fn regeneration_replaces_not_duplicates() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    generate_schedule(&conn, &config, &season, &north_params(5, 14))
        .await
        .expect("Generate schedule failed!");
    let second = generate_schedule(&conn, &config, &season, &north_params(5, 14))
        .await
        .expect("Regenerate schedule failed!");

    assert_eq!(second.matches_created, 40);
    let total = matches::Entity::find().count(&conn).await.unwrap();
    assert_eq!(total, 40);
}

#[tokio::test]
async fn regeneration_leaves_other_scopes_alone() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    seed_teams(&conn, 1, "south", 8).await;
    let season = bootstrap_season(&conn).await;

    let mut south = north_params(1, 7);
    south.subdivision = "south".to_string();

    generate_schedule(&conn, &config, &season, &north_params(1, 7))
        .await
        .expect("Generate north failed!");
    generate_schedule(&conn, &config, &season, &south)
        .await
        .expect("Generate south failed!");
    generate_schedule(&conn, &config, &season, &north_params(1, 7))
        .await
        .expect("Regenerate north failed!");

    let south_count = matches::Entity::find()
        .filter(matches::Column::Subdivision.eq("south"))
        .count(&conn)
        .await
        .unwrap();
    assert_eq!(south_count, 28);
}

#[tokio::test]
async fn wrong_team_count_is_a_configuration_error() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 6).await;
    let season = bootstrap_season(&conn).await;

    let err = generate_schedule(&conn, &config, &season, &north_params(1, 7))
        .await
        .expect_err("Expected configuration error");
    match err {
        EngineError::Configuration {
            expected, actual, ..
        } => {
            assert_eq!(expected, 8);
            assert_eq!(actual, 6);
        }
        other => panic!("unexpected error: {other}"),
    }

    let total = matches::Entity::find().count(&conn).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn inverted_day_range_is_rejected() {
    let (conn, config) = setup().await;
    seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;

    let err = generate_schedule(&conn, &config, &season, &north_params(10, 5))
        .await
        .expect_err("Expected day range error");
    assert!(matches!(err, EngineError::InvalidDayRange { .. }));
}
