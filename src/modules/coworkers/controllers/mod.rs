pub mod coworker_controller;

pub use coworker_controller::configure;
