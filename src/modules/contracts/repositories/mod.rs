pub mod contract_repository;
pub mod memory_contract_repository;

pub use contract_repository::{ContractRepository, MySqlContractRepository};
pub use memory_contract_repository::InMemoryContractRepository;
