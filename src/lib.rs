//! contractdesk: coworker and contract records over a generic CRUD layer.
//!
//! Each entity module plugs a model into the shared controller/service/repository
//! stack in `modules::common`; contracts extend it with status and value history.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::{AppServices, Storage};
pub use modules::contracts;
pub use modules::coworkers;
