use std::time::Duration;

use crate::core::{phase, reconciler};
use crate::persistence;
use crate::state::AppState;

/// Periodic integrity pass: repairs stuck matches on a fixed interval.
/// Failures are logged and the loop keeps running.
pub fn spawn_repair_loop(state: AppState) {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(state.config.repair_interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match reconciler::repair_stuck_matches(&state.conn, &state.config).await {
                Ok(outcome) if outcome.fixed_count > 0 => {
                    tracing::info!(fixed = outcome.fixed_count, "repair pass fixed matches");
                }
                Ok(_) => {}
                Err(err) => tracing::error!(error = %err, "repair pass failed"),
            }
        }
    });
}

/// Periodic day tick: advances the current season's day counter, which in
/// turn drives phase transitions and bracket progression.
pub fn spawn_day_ticker(state: AppState) {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(state.config.day_tick_interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so a freshly started
        // server does not jump the calendar ahead.
        interval.tick().await;
        loop {
            interval.tick().await;
            let season = match persistence::seasons::current_season(&state.conn).await {
                Ok(Some(season)) => season,
                Ok(None) => {
                    tracing::debug!("no season yet, day tick skipped");
                    continue;
                }
                Err(err) => {
                    tracing::error!(error = %err, "day tick could not load season");
                    continue;
                }
            };
            match phase::tick_day(&state.conn, &state.config, season.id).await {
                Ok(outcome) => {
                    tracing::info!(season_id = outcome.season_id, phase = ?outcome.phase, "day ticked")
                }
                Err(err) => tracing::error!(error = %err, "day tick failed"),
            }
        }
    });
}
