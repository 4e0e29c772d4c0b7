pub mod fixture;
pub mod outcome;
pub mod pagination;
pub mod season;
pub mod team;
pub mod tournament;
