use sea_orm::{EntityTrait, PaginatorTrait};

use app::core::bracket::{advance_bracket_round, generate_bracket};
use app::error::EngineError;
use app::persistence::{matches, tournaments};
use models::domains::matches as match_domain;
use models::domains::sea_orm_active_enums::{MatchStatus, TournamentStatus};

use crate::common::{bootstrap_season, force_complete, seed_teams, setup};

#[tokio::test]
async fn eight_entries_produce_standard_round_one() {
    let (conn, config) = setup().await;
    let teams = seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;
    let ids: Vec<i32> = teams.iter().map(|t| t.id).collect();

    let tournament =
        tournaments::create_tournament(&conn, season.id, 1, "north", "North Cup", &ids)
            .await
            .expect("Create tournament failed!");

    let outcome = generate_bracket(&conn, &config, &tournament.id)
        .await
        .expect("Generate bracket failed!");
    assert_eq!(outcome.matches_created, 4);

    let fixtures = matches::list_for_tournament(&conn, &tournament.id)
        .await
        .unwrap();
    assert_eq!(fixtures.len(), 4);

    // Bracket order: (1,8), (4,5), (2,7), (3,6) by seed, higher seed at home.
    let expected = [(ids[0], ids[7]), (ids[3], ids[4]), (ids[1], ids[6]), (ids[2], ids[5])];
    for (slot, fixture) in fixtures.iter().enumerate() {
        assert_eq!(fixture.round, Some(1));
        assert_eq!(fixture.bracket_slot, Some(slot as i32));
        assert_eq!(fixture.status, MatchStatus::Scheduled);
        assert_eq!(
            (fixture.home_team_id, fixture.away_team_id),
            expected[slot]
        );
    }
}

#[tokio::test]
async fn second_generation_is_a_no_op() {
    let (conn, config) = setup().await;
    let teams = seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;
    let ids: Vec<i32> = teams.iter().map(|t| t.id).collect();

    let tournament =
        tournaments::create_tournament(&conn, season.id, 1, "north", "North Cup", &ids)
            .await
            .expect("Create tournament failed!");

    generate_bracket(&conn, &config, &tournament.id)
        .await
        .expect("Generate bracket failed!");
    let again = generate_bracket(&conn, &config, &tournament.id)
        .await
        .expect("Second generation failed!");

    assert_eq!(again.matches_created, 0);
    let count = match_domain::Entity::find().count(&conn).await.unwrap();
    assert_eq!(count, 4);
}

#[tokio::test]
async fn seven_entries_fail_with_invalid_bracket_size() {
    let (conn, config) = setup().await;
    let teams = seed_teams(&conn, 1, "north", 7).await;
    let season = bootstrap_season(&conn).await;
    let ids: Vec<i32> = teams.iter().map(|t| t.id).collect();

    let tournament =
        tournaments::create_tournament(&conn, season.id, 1, "north", "North Cup", &ids)
            .await
            .expect("Create tournament failed!");

    let err = generate_bracket(&conn, &config, &tournament.id)
        .await
        .expect_err("Expected bracket size error");
    match err {
        EngineError::InvalidBracketSize {
            expected, actual, ..
        } => {
            assert_eq!(expected, 8);
            assert_eq!(actual, 7);
        }
        other => panic!("unexpected error: {other}"),
    }

    let count = match_domain::Entity::find().count(&conn).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn winners_carry_forward_until_the_final() {
    let (conn, config) = setup().await;
    let teams = seed_teams(&conn, 1, "north", 8).await;
    let season = bootstrap_season(&conn).await;
    let ids: Vec<i32> = teams.iter().map(|t| t.id).collect();

    let tournament =
        tournaments::create_tournament(&conn, season.id, 1, "north", "North Cup", &ids)
            .await
            .expect("Create tournament failed!");
    generate_bracket(&conn, &config, &tournament.id)
        .await
        .expect("Generate bracket failed!");

    // Not every round-1 match is done yet: no advancement.
    let fixtures = matches::list_for_tournament(&conn, &tournament.id)
        .await
        .unwrap();
    force_complete(&conn, fixtures[0].clone(), 2, 1).await;
    let created = advance_bracket_round(&conn, &config, &tournament.id)
        .await
        .expect("Advance failed!");
    assert_eq!(created, 0);

    // Home side wins everything; semifinals must pair slot winners in order.
    for fixture in fixtures.into_iter().skip(1) {
        force_complete(&conn, fixture, 3, 0).await;
    }
    let created = advance_bracket_round(&conn, &config, &tournament.id)
        .await
        .expect("Advance to semifinals failed!");
    assert_eq!(created, 2);

    let all = matches::list_for_tournament(&conn, &tournament.id)
        .await
        .unwrap();
    let semis: Vec<_> = all.iter().filter(|m| m.round == Some(2)).collect();
    assert_eq!(semis.len(), 2);
    assert_eq!((semis[0].home_team_id, semis[0].away_team_id), (ids[0], ids[3]));
    assert_eq!((semis[1].home_team_id, semis[1].away_team_id), (ids[1], ids[2]));

    for semi in semis.into_iter().cloned().collect::<Vec<_>>() {
        force_complete(&conn, semi, 1, 0).await;
    }
    let created = advance_bracket_round(&conn, &config, &tournament.id)
        .await
        .expect("Advance to final failed!");
    assert_eq!(created, 1);

    let all = matches::list_for_tournament(&conn, &tournament.id)
        .await
        .unwrap();
    let finals: Vec<_> = all.iter().filter(|m| m.round == Some(3)).cloned().collect();
    assert_eq!(finals.len(), 1);
    assert_eq!(
        (finals[0].home_team_id, finals[0].away_team_id),
        (ids[0], ids[1])
    );

    force_complete(&conn, finals.into_iter().next().unwrap(), 2, 0).await;
    let created = advance_bracket_round(&conn, &config, &tournament.id)
        .await
        .expect("Final advancement failed!");
    assert_eq!(created, 0);

    let tournament = tournaments::find_tournament(&conn, &tournament.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tournament.status, TournamentStatus::Completed);
}
