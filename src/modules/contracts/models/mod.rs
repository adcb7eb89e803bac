pub mod contract;
pub mod contract_value;

pub use contract::{
    Contract, ContractStatus, CreateContractDto, UpdateContractDto, UpdateContractStatusDto,
};
pub use contract_value::{ContractValue, NewContractValue};
