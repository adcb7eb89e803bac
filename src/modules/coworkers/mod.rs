// Coworkers module: the generic resource pair, plus the memory-backend store
// that keeps contract assignments consistent

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Coworker, CreateCoworkerDto, UpdateCoworkerDto};
pub use repositories::InMemoryCoworkerRepository;
pub use services::CoworkerService;
