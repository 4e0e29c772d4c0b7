pub mod schedule;
pub mod season;
pub mod team;
