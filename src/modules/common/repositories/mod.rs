pub mod memory_repository;
pub mod mysql_repository;

pub use memory_repository::InMemoryRepository;
pub use mysql_repository::{bind_value, bind_value_as, insert_row, MySqlRepository};
