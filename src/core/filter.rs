use crate::core::traits::entity::{ColumnValue, Entity};
use crate::core::{AppError, Result};

/// Conjunction of column equality conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, ColumnValue)>,
}

impl Filter {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the record with the given identifier
    pub fn id(id: impl Into<String>) -> Self {
        Self::all().eq("id", ColumnValue::Text(id.into()))
    }

    /// Add an equality condition
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, ColumnValue)] {
        &self.conditions
    }

    /// Reject conditions on columns the entity does not declare.
    ///
    /// Column names end up in SQL text, so this must pass before a query is built.
    pub fn check_columns<E: Entity>(&self) -> Result<()> {
        for (column, _) in &self.conditions {
            if !E::COLUMNS.contains(&column.as_str()) {
                return Err(AppError::validation(format!(
                    "Unknown filter field '{}' for {}",
                    column,
                    E::NAME
                )));
            }
        }

        Ok(())
    }

    /// Evaluate against a serialized record
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        self.conditions.iter().all(|(column, value)| {
            let field = record.get(column).unwrap_or(&serde_json::Value::Null);
            value.matches(field)
        })
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "*");
        }

        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|(column, value)| match value {
                ColumnValue::Text(s) => format!("{} = '{}'", column, s),
                other => format!("{} = {:?}", column, other),
            })
            .collect();

        write!(f, "{}", parts.join(" AND "))
    }
}
