pub mod common;
pub mod contracts;
pub mod coworkers;
pub mod health;
