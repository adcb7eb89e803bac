// Generic resource layer shared by every entity module

pub mod controllers;
pub mod repositories;
pub mod services;

pub use controllers::Validated;
pub use repositories::{InMemoryRepository, MySqlRepository};
pub use services::GenericService;
