pub mod coworker;

pub use coworker::{Coworker, CreateCoworkerDto, UpdateCoworkerDto};
