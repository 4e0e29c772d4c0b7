pub mod audit_logs;
pub mod matches;
pub mod sea_orm_active_enums;
pub mod seasons;
pub mod teams;
pub mod tournament_entries;
pub mod tournaments;

pub use audit_logs::Entity as AuditLogs;
pub use matches::Entity as Matches;
pub use seasons::Entity as Seasons;
pub use teams::Entity as Teams;
pub use tournament_entries::Entity as TournamentEntries;
pub use tournaments::Entity as Tournaments;
