pub mod memory_coworker_repository;

pub use memory_coworker_repository::InMemoryCoworkerRepository;
