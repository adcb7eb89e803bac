use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Executor, MySql, MySqlPool};
use uuid::Uuid;

use crate::core::{AppError, Columns, Filter, Repository, Result};
use crate::modules::common::repositories::{insert_row, MySqlRepository};
use crate::modules::contracts::models::{
    Contract, ContractStatus, ContractValue, CreateContractDto, NewContractValue,
    UpdateContractDto,
};

/// Contract persistence: the generic primitives plus value-history access
#[async_trait]
pub trait ContractRepository: Repository<Contract> {
    /// Insert a contract and its first value record as one unit
    async fn create_with_initial_value(
        &self,
        data: &CreateContractDto,
    ) -> Result<(Contract, ContractValue)>;

    /// Replace the status field only
    async fn update_status(&self, id: &str, status: ContractStatus) -> Result<Option<Contract>>;

    /// Append a value record to an existing contract
    async fn add_value(&self, contract_id: &str, value: &NewContractValue)
        -> Result<ContractValue>;

    /// Full value history, newest first
    async fn list_values(&self, contract_id: &str) -> Result<Vec<ContractValue>>;

    /// Most recent value of one contract
    async fn latest_value(&self, contract_id: &str) -> Result<Option<ContractValue>>;

    /// Most recent value of every contract that has one, keyed by contract id
    async fn latest_values(&self) -> Result<HashMap<String, ContractValue>>;
}

const VALUE_COLUMNS: &str = "id, contract_id, amount, recorded_at";

async fn insert_value<'c, X>(executor: X, value: &ContractValue) -> Result<()>
where
    X: Executor<'c, Database = MySql>,
{
    sqlx::query(
        r#"
        INSERT INTO contract_values (id, contract_id, amount, recorded_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(value.id.clone())
    .bind(value.contract_id.clone())
    .bind(value.amount)
    .bind(value.recorded_at)
    .execute(executor)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return AppError::not_found(format!(
                    "Contract with id '{}' not found",
                    value.contract_id
                ));
            }
        }
        AppError::Database(e)
    })?;

    Ok(())
}

/// MySQL-backed contract repository
#[derive(Clone)]
pub struct MySqlContractRepository {
    base: MySqlRepository<Contract>,
}

impl MySqlContractRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            base: MySqlRepository::new(pool),
        }
    }

    fn pool(&self) -> &MySqlPool {
        self.base.pool()
    }
}

#[async_trait]
impl Repository<Contract> for MySqlContractRepository {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Contract>> {
        self.base.find_many(filter).await
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Contract>> {
        self.base.find_one(filter).await
    }

    async fn create(&self, data: &CreateContractDto) -> Result<Contract> {
        let (contract, _) = self.create_with_initial_value(data).await?;
        Ok(contract)
    }

    async fn update(&self, filter: &Filter, data: &UpdateContractDto) -> Result<Option<Contract>> {
        self.base.update(filter, data).await
    }

    /// Value history goes with it (ON DELETE CASCADE)
    async fn delete(&self, filter: &Filter) -> Result<Option<Contract>> {
        self.base.delete(filter).await
    }
}

#[async_trait]
impl ContractRepository for MySqlContractRepository {
    async fn create_with_initial_value(
        &self,
        data: &CreateContractDto,
    ) -> Result<(Contract, ContractValue)> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let value = ContractValue::new(
            Uuid::new_v4().to_string(),
            id.clone(),
            &NewContractValue::new(data.initial_value, data.value_recorded_at.or(Some(now))),
        );

        let mut tx = self.pool().begin().await?;

        insert_row(&mut *tx, "contracts", &id, &data.columns(), now).await?;
        insert_value(&mut *tx, &value).await?;

        tx.commit().await?;

        let contract = self.base.find_one(&Filter::id(&id)).await?.ok_or_else(|| {
            AppError::internal(format!("Contract '{}' missing after insert", id))
        })?;

        Ok((contract, value))
    }

    async fn update_status(&self, id: &str, status: ContractStatus) -> Result<Option<Contract>> {
        sqlx::query(
            r#"
            UPDATE contracts
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(self.pool())
        .await?;

        self.base.find_one(&Filter::id(id)).await
    }

    async fn add_value(
        &self,
        contract_id: &str,
        value: &NewContractValue,
    ) -> Result<ContractValue> {
        let value = ContractValue::new(Uuid::new_v4().to_string(), contract_id.to_string(), value);
        insert_value(self.pool(), &value).await?;

        Ok(value)
    }

    async fn list_values(&self, contract_id: &str) -> Result<Vec<ContractValue>> {
        let sql = format!(
            "SELECT {} FROM contract_values WHERE contract_id = ? ORDER BY recorded_at DESC",
            VALUE_COLUMNS
        );

        let values = sqlx::query_as::<_, ContractValue>(&sql)
            .bind(contract_id.to_string())
            .fetch_all(self.pool())
            .await?;

        Ok(values)
    }

    async fn latest_value(&self, contract_id: &str) -> Result<Option<ContractValue>> {
        let sql = format!(
            "SELECT {} FROM contract_values WHERE contract_id = ? ORDER BY recorded_at DESC LIMIT 1",
            VALUE_COLUMNS
        );

        let value = sqlx::query_as::<_, ContractValue>(&sql)
            .bind(contract_id.to_string())
            .fetch_optional(self.pool())
            .await?;

        Ok(value)
    }

    async fn latest_values(&self) -> Result<HashMap<String, ContractValue>> {
        let values = sqlx::query_as::<_, ContractValue>(
            r#"
            SELECT v.id, v.contract_id, v.amount, v.recorded_at
            FROM contract_values v
            WHERE v.recorded_at = (
                SELECT MAX(v2.recorded_at)
                FROM contract_values v2
                WHERE v2.contract_id = v.contract_id
            )
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut latest = HashMap::new();
        for value in values {
            latest.entry(value.contract_id.clone()).or_insert(value);
        }

        Ok(latest)
    }
}
