use serde::Serialize;

use crate::domains::sea_orm_active_enums::SeasonPhase;

use super::team::TeamRecord;

/// Result of one schedule generation run over a subdivision.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub matches_created: u64,
    pub days_scheduled: u64,
}

/// `matches_created` is zero when the bracket already existed.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketOutcome {
    pub matches_created: u64,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub season_id: i32,
    pub phase: SeasonPhase,
}

#[derive(Serialize, Clone, Debug)]
pub struct RepairDetail {
    pub match_id: i32,
    pub repaired: bool,
    pub note: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct RepairOutcome {
    pub fixed_count: u64,
    pub details: Vec<RepairDetail>,
}

/// Before/after snapshot of a statistics resync, for audit and tests.
#[derive(Serialize, Clone, Debug)]
pub struct ResyncOutcome {
    pub team_id: i32,
    pub before: TeamRecord,
    pub after: TeamRecord,
    pub matches_processed: u64,
    pub discrepancies_found: bool,
}
