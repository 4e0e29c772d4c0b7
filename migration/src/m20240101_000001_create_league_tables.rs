use models::domains::{audit_logs, matches, seasons, teams, tournament_entries, tournaments};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(teams::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(teams::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(teams::Column::Name).string().not_null())
                    .col(ColumnDef::new(teams::Column::Division).integer().not_null())
                    .col(
                        ColumnDef::new(teams::Column::Subdivision)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Draws)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::PointsFor)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::PointsAgainst)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(teams::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(teams::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-teams-division-subdivision")
                    .table(teams::Entity)
                    .col(teams::Column::Division)
                    .col(teams::Column::Subdivision)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(seasons::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(seasons::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(seasons::Column::Number)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(seasons::Column::CurrentDay)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(seasons::Column::Phase)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(seasons::Column::StartedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(seasons::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(tournaments::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournaments::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::SeasonId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Division)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Subdivision)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(tournaments::Column::Name).string().not_null())
                    .col(
                        ColumnDef::new(tournaments::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tournament-season_id")
                            .from(tournaments::Entity, tournaments::Column::SeasonId)
                            .to(seasons::Entity, seasons::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // One playoff bracket per scope per season. This is the persistence
        // side of the generation idempotency guard.
        manager
            .create_index(
                Index::create()
                    .name("uniq-tournaments-scope")
                    .table(tournaments::Entity)
                    .col(tournaments::Column::SeasonId)
                    .col(tournaments::Column::Division)
                    .col(tournaments::Column::Subdivision)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(tournament_entries::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournament_entries::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::TournamentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::TeamId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::Seed)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entry-tournament_id")
                            .from(
                                tournament_entries::Entity,
                                tournament_entries::Column::TournamentId,
                            )
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entry-team_id")
                            .from(
                                tournament_entries::Entity,
                                tournament_entries::Column::TeamId,
                            )
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-entries-seed")
                    .table(tournament_entries::Entity)
                    .col(tournament_entries::Column::TournamentId)
                    .col(tournament_entries::Column::Seed)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-entries-team")
                    .table(tournament_entries::Entity)
                    .col(tournament_entries::Column::TournamentId)
                    .col(tournament_entries::Column::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(matches::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(matches::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(matches::Column::HomeTeamId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(matches::Column::AwayTeamId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(matches::Column::Division).integer().not_null())
                    .col(
                        ColumnDef::new(matches::Column::Subdivision)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(matches::Column::SeasonId).integer().not_null())
                    .col(ColumnDef::new(matches::Column::SeasonDay).integer().null())
                    .col(
                        ColumnDef::new(matches::Column::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(matches::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(matches::Column::HomeScore).integer().null())
                    .col(ColumnDef::new(matches::Column::AwayScore).integer().null())
                    .col(ColumnDef::new(matches::Column::Round).integer().null())
                    .col(ColumnDef::new(matches::Column::BracketSlot).integer().null())
                    .col(ColumnDef::new(matches::Column::TournamentId).string().null())
                    .col(
                        ColumnDef::new(matches::Column::Simulated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(matches::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(matches::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-match-season_id")
                            .from(matches::Entity, matches::Column::SeasonId)
                            .to(seasons::Entity, seasons::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-match-tournament_id")
                            .from(matches::Entity, matches::Column::TournamentId)
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-match-home_team_id")
                            .from(matches::Entity, matches::Column::HomeTeamId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-match-away_team_id")
                            .from(matches::Entity, matches::Column::AwayTeamId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Bracket slots are unique per tournament round: a second concurrent
        // bracket generation for the same tournament cannot double-insert.
        manager
            .create_index(
                Index::create()
                    .name("uniq-matches-bracket-slot")
                    .table(matches::Entity)
                    .col(matches::Column::TournamentId)
                    .col(matches::Column::Round)
                    .col(matches::Column::BracketSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-matches-schedule-scope")
                    .table(matches::Entity)
                    .col(matches::Column::SeasonId)
                    .col(matches::Column::Division)
                    .col(matches::Column::Subdivision)
                    .col(matches::Column::SeasonDay)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-matches-status-created")
                    .table(matches::Entity)
                    .col(matches::Column::Status)
                    .col(matches::Column::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(audit_logs::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(audit_logs::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(audit_logs::Column::Scope).string().not_null())
                    .col(ColumnDef::new(audit_logs::Column::Message).text().not_null())
                    .col(
                        ColumnDef::new(audit_logs::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(audit_logs::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(matches::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournament_entries::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournaments::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(seasons::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(teams::Entity).to_owned())
            .await?;

        Ok(())
    }
}
