// Contracts module: the generic resource pair extended with status and value history

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Contract, ContractStatus, ContractValue};
pub use repositories::{ContractRepository, InMemoryContractRepository, MySqlContractRepository};
pub use services::{ContractService, DocumentRenderer, PdfRenderer};
