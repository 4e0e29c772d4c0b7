use sea_orm::entity::prelude::*;

/// The record fields (wins through points) are a cached projection of the
/// team's COMPLETED matches. The reconciler recomputes them from the match
/// log; nothing else may decrement them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub division: i32,
    pub subdivision: String,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub points_for: i32,
    pub points_against: i32,
    pub points: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tournament_entries::Entity")]
    TournamentEntries,
}

impl Related<super::tournament_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
