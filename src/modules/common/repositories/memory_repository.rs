use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::{AppError, Entity, Filter, Repository, Result};

/// Process-local store backed by a vector behind an async lock.
///
/// Used by the `memory` storage backend and by tests. Cloning shares the
/// underlying rows.
pub struct InMemoryRepository<E: Entity> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store a fully-built record as-is
    pub async fn insert(&self, entity: E) -> E {
        self.rows.write().await.push(entity.clone());
        entity
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Apply `change` to every row `select` accepts; returns the number changed
    pub async fn update_where<P, F>(&self, select: P, mut change: F) -> usize
    where
        P: Fn(&E) -> bool,
        F: FnMut(&mut E),
    {
        let mut rows = self.rows.write().await;

        let mut changed = 0;
        for row in rows.iter_mut().filter(|row| select(row)) {
            change(row);
            changed += 1;
        }

        changed
    }
}

fn matches<E: Entity>(filter: &Filter, entity: &E) -> Result<bool> {
    if filter.is_empty() {
        return Ok(true);
    }

    let record = serde_json::to_value(entity)?;
    Ok(filter.matches(&record))
}

fn position<E: Entity>(rows: &[E], filter: &Filter) -> Result<Option<usize>> {
    for (idx, row) in rows.iter().enumerate() {
        if matches(filter, row)? {
            return Ok(Some(idx));
        }
    }

    Ok(None)
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.check_columns::<E>()?;
        let rows = self.rows.read().await;

        let mut found = Vec::new();
        // Reverse insertion order so equal timestamps still list newest first
        for row in rows.iter().rev() {
            if matches(filter, row)? {
                found.push(row.clone());
            }
        }
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(found)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<E>> {
        filter.check_columns::<E>()?;
        let rows = self.rows.read().await;

        Ok(position(&rows, filter)?.map(|idx| rows[idx].clone()))
    }

    async fn create(&self, data: &E::Create) -> Result<E> {
        let entity = E::from_create(Uuid::new_v4().to_string(), data, Utc::now());
        Ok(self.insert(entity).await)
    }

    async fn update(&self, filter: &Filter, data: &E::Update) -> Result<Option<E>> {
        filter.check_columns::<E>()?;
        let mut rows = self.rows.write().await;

        let Some(idx) = position(&rows, filter)? else {
            return Ok(None);
        };

        let row = rows
            .get_mut(idx)
            .ok_or_else(|| AppError::internal(format!("{} row vanished", E::NAME)))?;
        row.apply_update(data, Utc::now());

        Ok(Some(row.clone()))
    }

    async fn delete(&self, filter: &Filter) -> Result<Option<E>> {
        filter.check_columns::<E>()?;
        let mut rows = self.rows.write().await;

        Ok(position(&rows, filter)?.map(|idx| rows.remove(idx)))
    }
}
