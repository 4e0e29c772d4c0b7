mod common;

mod bracket;
mod phase;
mod schedule;
