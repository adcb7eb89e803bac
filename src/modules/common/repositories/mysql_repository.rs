use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Executor, FromRow, MySql, MySqlPool};
use uuid::Uuid;

use crate::core::{AppError, ColumnValue, Columns, Entity, Filter, Repository, Result};

/// Bind a column value to a statement
pub fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &ColumnValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value.clone() {
        ColumnValue::Null => query.bind(None::<String>),
        ColumnValue::Text(s) => query.bind(s),
        ColumnValue::Int(i) => query.bind(i),
        ColumnValue::Bool(b) => query.bind(b),
        ColumnValue::Decimal(d) => query.bind(d),
        ColumnValue::Timestamp(ts) => query.bind(ts),
    }
}

/// Bind a column value to a typed select
pub fn bind_value_as<'q, O>(
    query: QueryAs<'q, MySql, O, MySqlArguments>,
    value: &ColumnValue,
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    match value.clone() {
        ColumnValue::Null => query.bind(None::<String>),
        ColumnValue::Text(s) => query.bind(s),
        ColumnValue::Int(i) => query.bind(i),
        ColumnValue::Bool(b) => query.bind(b),
        ColumnValue::Decimal(d) => query.bind(d),
        ColumnValue::Timestamp(ts) => query.bind(ts),
    }
}

/// `WHERE a = ? AND b = ?` for a filter whose columns were already checked
fn where_clause(filter: &Filter) -> String {
    if filter.is_empty() {
        return String::new();
    }

    let conditions: Vec<String> = filter
        .conditions()
        .iter()
        .map(|(column, value)| match value {
            ColumnValue::Null => format!("{} IS NULL", column),
            _ => format!("{} = ?", column),
        })
        .collect();

    format!(" WHERE {}", conditions.join(" AND "))
}

fn filter_values(filter: &Filter) -> impl Iterator<Item = &ColumnValue> {
    filter
        .conditions()
        .iter()
        .map(|(_, value)| value)
        .filter(|value| **value != ColumnValue::Null)
}

/// Insert one row with a given id and timestamps.
///
/// Takes any executor so callers can run it inside a transaction.
pub async fn insert_row<'c, X>(
    executor: X,
    table: &str,
    id: &str,
    columns: &[(&'static str, ColumnValue)],
    now: DateTime<Utc>,
) -> Result<()>
where
    X: Executor<'c, Database = MySql>,
{
    let mut names = vec!["id"];
    names.extend(columns.iter().map(|(name, _)| *name));
    names.extend(["created_at", "updated_at"]);

    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(id.to_string());
    for (_, value) in columns {
        query = bind_value(query, value);
    }
    query = query.bind(now).bind(now);

    query
        .execute(executor)
        .await
        .map_err(|e| write_error(table, e))?;

    Ok(())
}

/// Constraint violations on insert or update are the caller's fault
fn write_error(table: &str, e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::validation(format!(
                "Write to {} references a missing record",
                table
            ));
        }
        if db_err.is_unique_violation() {
            return AppError::validation(format!("Duplicate record in {}", table));
        }
    }
    AppError::Database(e)
}

/// Generic MySQL repository driven by the entity's table and column metadata
pub struct MySqlRepository<E> {
    pool: MySqlPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for MySqlRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> MySqlRepository<E>
where
    E: Entity + for<'r> FromRow<'r, MySqlRow>,
{
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn select_sql(filter: &Filter) -> String {
        format!(
            "SELECT {} FROM {}{}",
            E::COLUMNS.join(", "),
            E::TABLE,
            where_clause(filter)
        )
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<E>> {
        self.find_one(&Filter::id(id)).await
    }
}

#[async_trait]
impl<E> Repository<E> for MySqlRepository<E>
where
    E: Entity + for<'r> FromRow<'r, MySqlRow>,
{
    async fn find_many(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.check_columns::<E>()?;

        let sql = format!("{} ORDER BY created_at DESC", Self::select_sql(filter));
        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in filter_values(filter) {
            query = bind_value_as(query, value);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<E>> {
        filter.check_columns::<E>()?;

        let sql = format!("{} LIMIT 1", Self::select_sql(filter));
        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in filter_values(filter) {
            query = bind_value_as(query, value);
        }

        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn create(&self, data: &E::Create) -> Result<E> {
        let id = Uuid::new_v4().to_string();
        insert_row(&self.pool, E::TABLE, &id, &data.columns(), Utc::now()).await?;

        self.fetch_by_id(&id)
            .await?
            .ok_or_else(|| AppError::internal(format!("{} '{}' missing after insert", E::NAME, id)))
    }

    async fn update(&self, filter: &Filter, data: &E::Update) -> Result<Option<E>> {
        let Some(existing) = self.find_one(filter).await? else {
            return Ok(None);
        };

        let columns = data.columns();
        let mut assignments: Vec<String> = columns
            .iter()
            .map(|(name, _)| format!("{} = ?", name))
            .collect();
        assignments.push("updated_at = ?".to_string());

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            E::TABLE,
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in &columns {
            query = bind_value(query, value);
        }
        query
            .bind(Utc::now())
            .bind(existing.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(E::TABLE, e))?;

        self.fetch_by_id(existing.id()).await
    }

    async fn delete(&self, filter: &Filter) -> Result<Option<E>> {
        let Some(existing) = self.find_one(filter).await? else {
            return Ok(None);
        };

        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        sqlx::query(&sql)
            .bind(existing.id().to_string())
            .execute(&self.pool)
            .await?;

        Ok(Some(existing))
    }
}
