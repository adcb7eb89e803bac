use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Filter, Result};
use crate::modules::common::GenericService;
use crate::modules::contracts::models::{
    Contract, ContractStatus, ContractValue, CreateContractDto, NewContractValue,
    UpdateContractDto,
};
use crate::modules::contracts::repositories::ContractRepository;
use crate::modules::contracts::services::document_renderer::DocumentRenderer;

/// A rendered contract ready to be served as a file
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Contract operations layered on top of the generic service
pub struct ContractService {
    base: GenericService<Contract>,
    contracts: Arc<dyn ContractRepository>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl ContractService {
    pub fn new<R>(repo: Arc<R>, renderer: Arc<dyn DocumentRenderer>) -> Self
    where
        R: ContractRepository + 'static,
    {
        Self {
            base: GenericService::new(repo.clone()),
            contracts: repo,
            renderer,
        }
    }

    /// Create a contract and its first value-history entry in one unit
    pub async fn create_with_initial_value(&self, dto: &CreateContractDto) -> Result<Contract> {
        let (contract, value) = self.contracts.create_with_initial_value(dto).await?;

        info!(
            contract_id = %contract.id,
            status = %contract.status,
            amount = %value.amount,
            "Contract created with initial value"
        );

        Ok(contract.with_latest_value(Some(value)))
    }

    pub async fn find_all_contracts_with_latest_value(&self) -> Result<Vec<Contract>> {
        self.find_contracts_with_latest_value(&Filter::all()).await
    }

    /// Contracts matching `filter`, each paired with its latest value
    pub async fn find_contracts_with_latest_value(&self, filter: &Filter) -> Result<Vec<Contract>> {
        let contracts = self.base.find_many(filter).await?;
        let mut latest = self.contracts.latest_values().await?;

        Ok(contracts
            .into_iter()
            .map(|contract| {
                let value = latest.remove(&contract.id);
                contract.with_latest_value(value)
            })
            .collect())
    }

    pub async fn find_contract_with_latest_value(&self, id: &str) -> Result<Contract> {
        let contract = self.base.find_one(&Filter::id(id)).await?;
        let value = self.contracts.latest_value(id).await?;

        Ok(contract.with_latest_value(value))
    }

    /// Partial update of the contract fields; the value history is untouched
    pub async fn update_contract(&self, id: &str, dto: &UpdateContractDto) -> Result<Contract> {
        let contract = self.base.update(&Filter::id(id), dto).await?;
        let value = self.contracts.latest_value(id).await?;

        Ok(contract.with_latest_value(value))
    }

    /// Set the status field only; every transition is allowed
    pub async fn update_contract_status(&self, id: &str, status: ContractStatus) -> Result<Contract> {
        let contract = self
            .contracts
            .update_status(id, status)
            .await?
            .ok_or_else(|| contract_not_found(id))?;
        let value = self.contracts.latest_value(id).await?;

        info!(contract_id = %id, status = %status, "Contract status updated");

        Ok(contract.with_latest_value(value))
    }

    /// Delete a contract and its history, returning it as it was last seen
    pub async fn delete_contract(&self, id: &str) -> Result<Contract> {
        let value = self.contracts.latest_value(id).await?;
        let contract = self.base.delete(&Filter::id(id)).await?;

        info!(contract_id = %id, "Contract deleted");

        Ok(contract.with_latest_value(value))
    }

    pub async fn add_value(&self, id: &str, value: &NewContractValue) -> Result<ContractValue> {
        // Surface a missing contract as NotFound before touching the history
        self.base.find_one(&Filter::id(id)).await?;

        let value = self.contracts.add_value(id, value).await?;
        info!(contract_id = %id, amount = %value.amount, "Contract value recorded");

        Ok(value)
    }

    /// Value history, newest first
    pub async fn list_values(&self, id: &str) -> Result<Vec<ContractValue>> {
        self.base.find_one(&Filter::id(id)).await?;
        self.contracts.list_values(id).await
    }

    pub async fn render_document(&self, id: &str) -> Result<RenderedDocument> {
        let contract = self.find_contract_with_latest_value(id).await?;
        let bytes = self.renderer.render(&contract)?;

        Ok(RenderedDocument {
            file_name: format!("contract-{}.{}", contract.id, self.renderer.extension()),
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}

fn contract_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Contract with id '{}' not found", id))
}
