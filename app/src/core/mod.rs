pub mod bracket;
pub mod phase;
pub mod reconciler;
pub mod schedule;

/// League scoring rule: 3 for a win, 1 for a draw, 0 for a loss.
pub const POINTS_WIN: i32 = 3;
pub const POINTS_DRAW: i32 = 1;
