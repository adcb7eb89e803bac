use std::sync::Arc;

use tracing::debug;

use crate::core::{AppError, Entity, Filter, Repository, Result};

/// Uniform data-access facade for one entity type.
///
/// Forwards every call to the injected repository and turns "no match" into
/// [`AppError::NotFound`]. Specialized services wrap this type instead of
/// re-implementing the CRUD paths.
pub struct GenericService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for GenericService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<E: Entity> GenericService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    /// All records, newest first
    pub async fn find_all(&self) -> Result<Vec<E>> {
        self.find_many(&Filter::all()).await
    }

    /// Records matching an equality filter on declared columns
    pub async fn find_many(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.check_columns::<E>()?;
        debug!(entity = E::NAME, filter = %filter, "find_many");

        self.repo.find_many(filter).await
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<E> {
        filter.check_columns::<E>()?;
        debug!(entity = E::NAME, filter = %filter, "find_one");

        self.repo
            .find_one(filter)
            .await?
            .ok_or_else(|| not_found::<E>(filter))
    }

    pub async fn create(&self, data: &E::Create) -> Result<E> {
        let created = self.repo.create(data).await?;
        debug!(entity = E::NAME, id = created.id(), "created");

        Ok(created)
    }

    pub async fn update(&self, filter: &Filter, data: &E::Update) -> Result<E> {
        filter.check_columns::<E>()?;
        debug!(entity = E::NAME, filter = %filter, "update");

        self.repo
            .update(filter, data)
            .await?
            .ok_or_else(|| not_found::<E>(filter))
    }

    pub async fn delete(&self, filter: &Filter) -> Result<E> {
        filter.check_columns::<E>()?;
        debug!(entity = E::NAME, filter = %filter, "delete");

        self.repo
            .delete(filter)
            .await?
            .ok_or_else(|| not_found::<E>(filter))
    }
}

fn not_found<E: Entity>(filter: &Filter) -> AppError {
    AppError::not_found(format!("{} matching {} not found", E::NAME, filter))
}
