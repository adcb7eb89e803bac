use async_trait::async_trait;

use crate::core::{Filter, Repository, Result};
use crate::modules::contracts::repositories::InMemoryContractRepository;
use crate::modules::coworkers::models::{Coworker, CreateCoworkerDto, UpdateCoworkerDto};

/// Coworker store of the `memory` backend.
///
/// Rows live inside the contract repository so a delete can unassign the
/// coworker's contracts the way `ON DELETE SET NULL` does in MySQL.
#[derive(Clone, Default)]
pub struct InMemoryCoworkerRepository {
    contracts: InMemoryContractRepository,
}

impl InMemoryCoworkerRepository {
    pub fn new(contracts: InMemoryContractRepository) -> Self {
        Self { contracts }
    }
}

#[async_trait]
impl Repository<Coworker> for InMemoryCoworkerRepository {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Coworker>> {
        self.contracts.coworker_rows().find_many(filter).await
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Coworker>> {
        self.contracts.coworker_rows().find_one(filter).await
    }

    async fn create(&self, data: &CreateCoworkerDto) -> Result<Coworker> {
        self.contracts.coworker_rows().create(data).await
    }

    async fn update(&self, filter: &Filter, data: &UpdateCoworkerDto) -> Result<Option<Coworker>> {
        self.contracts.coworker_rows().update(filter, data).await
    }

    async fn delete(&self, filter: &Filter) -> Result<Option<Coworker>> {
        self.contracts.remove_coworker(filter).await
    }
}
