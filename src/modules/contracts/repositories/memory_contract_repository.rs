use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::contract_repository::ContractRepository;
use crate::core::{AppError, Filter, Repository, Result};
use crate::modules::common::repositories::InMemoryRepository;
use crate::modules::contracts::models::contract_value::latest;
use crate::modules::contracts::models::{
    Contract, ContractStatus, ContractValue, CreateContractDto, NewContractValue,
    UpdateContractDto,
};
use crate::modules::coworkers::models::Coworker;

/// Process-local contract store.
///
/// Holds the coworker rows contracts refer to so `coworker_id` is checked on
/// write and cleared when the coworker goes away. Any write that touches more
/// than one store takes the values lock first.
#[derive(Clone, Default)]
pub struct InMemoryContractRepository {
    contracts: InMemoryRepository<Contract>,
    values: Arc<RwLock<Vec<ContractValue>>>,
    coworkers: InMemoryRepository<Coworker>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn value_count(&self) -> usize {
        self.values.read().await.len()
    }

    /// Coworker rows shared with the coworker repository
    pub fn coworker_rows(&self) -> &InMemoryRepository<Coworker> {
        &self.coworkers
    }

    /// Delete a coworker and unassign every contract that referenced it
    pub async fn remove_coworker(&self, filter: &Filter) -> Result<Option<Coworker>> {
        let _values = self.values.write().await;

        let Some(coworker) = self.coworkers.delete(filter).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let unassigned = self
            .contracts
            .update_where(
                |c| c.coworker_id.as_deref() == Some(coworker.id.as_str()),
                |c| {
                    c.coworker_id = None;
                    c.updated_at = now;
                },
            )
            .await;
        tracing::debug!(coworker_id = %coworker.id, unassigned, "Coworker removed");

        Ok(Some(coworker))
    }

    async fn require_coworker(&self, coworker_id: Option<&str>) -> Result<()> {
        let Some(id) = coworker_id else {
            return Ok(());
        };

        if self.coworkers.find_one(&Filter::id(id)).await?.is_none() {
            return Err(AppError::validation(format!(
                "Coworker with id '{}' does not exist",
                id
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Repository<Contract> for InMemoryContractRepository {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Contract>> {
        self.contracts.find_many(filter).await
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Contract>> {
        self.contracts.find_one(filter).await
    }

    async fn create(&self, data: &CreateContractDto) -> Result<Contract> {
        let (contract, _) = self.create_with_initial_value(data).await?;
        Ok(contract)
    }

    async fn update(&self, filter: &Filter, data: &UpdateContractDto) -> Result<Option<Contract>> {
        let _values = self.values.write().await;
        self.require_coworker(data.coworker_id.as_deref()).await?;

        self.contracts.update(filter, data).await
    }

    async fn delete(&self, filter: &Filter) -> Result<Option<Contract>> {
        let mut values = self.values.write().await;
        let removed = self.contracts.delete(filter).await?;

        if let Some(contract) = &removed {
            values.retain(|v| v.contract_id != contract.id);
        }

        Ok(removed)
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn create_with_initial_value(
        &self,
        data: &CreateContractDto,
    ) -> Result<(Contract, ContractValue)> {
        let mut values = self.values.write().await;
        self.require_coworker(data.coworker_id.as_deref()).await?;

        let contract = self.contracts.create(data).await?;
        let value = ContractValue::new(
            Uuid::new_v4().to_string(),
            contract.id.clone(),
            &NewContractValue::new(
                data.initial_value,
                data.value_recorded_at.or(Some(contract.created_at)),
            ),
        );
        values.push(value.clone());

        Ok((contract, value))
    }

    async fn update_status(&self, id: &str, status: ContractStatus) -> Result<Option<Contract>> {
        let patch = UpdateContractDto {
            status: Some(status),
            ..Default::default()
        };

        self.contracts.update(&Filter::id(id), &patch).await
    }

    async fn add_value(
        &self,
        contract_id: &str,
        value: &NewContractValue,
    ) -> Result<ContractValue> {
        let mut values = self.values.write().await;

        if self.contracts.find_one(&Filter::id(contract_id)).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Contract with id '{}' not found",
                contract_id
            )));
        }

        let value = ContractValue::new(Uuid::new_v4().to_string(), contract_id.to_string(), value);
        values.push(value.clone());

        Ok(value)
    }

    async fn list_values(&self, contract_id: &str) -> Result<Vec<ContractValue>> {
        let values = self.values.read().await;

        let mut history: Vec<ContractValue> = values
            .iter()
            .rev()
            .filter(|v| v.contract_id == contract_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        Ok(history)
    }

    async fn latest_value(&self, contract_id: &str) -> Result<Option<ContractValue>> {
        let values = self.values.read().await;

        Ok(latest(values.iter().filter(|v| v.contract_id == contract_id)).cloned())
    }

    async fn latest_values(&self) -> Result<HashMap<String, ContractValue>> {
        let values = self.values.read().await;

        let mut grouped: HashMap<&str, Vec<&ContractValue>> = HashMap::new();
        for value in values.iter() {
            grouped.entry(value.contract_id.as_str()).or_default().push(value);
        }

        Ok(grouped
            .into_iter()
            .filter_map(|(contract_id, history)| {
                latest(history).map(|v| (contract_id.to_string(), v.clone()))
            })
            .collect())
    }
}
