use async_trait::async_trait;

use super::entity::Entity;
use crate::core::{Filter, Result};

/// Data-access primitives for one entity type.
///
/// `None` from `find_one`, `update` or `delete` means the filter matched no
/// record; classifying that as an error is the service's job.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All records matching `filter`, newest first. An empty filter matches everything.
    async fn find_many(&self, filter: &Filter) -> Result<Vec<E>>;

    /// First record matching `filter`
    async fn find_one(&self, filter: &Filter) -> Result<Option<E>>;

    /// Insert a record, generating its id and timestamps
    async fn create(&self, data: &E::Create) -> Result<E>;

    /// Apply a partial update to the matched record and return it
    async fn update(&self, filter: &Filter, data: &E::Update) -> Result<Option<E>>;

    /// Remove the matched record and return what was removed
    async fn delete(&self, filter: &Filter) -> Result<Option<E>>;
}
