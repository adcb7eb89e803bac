use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::traits::validate::{optional_text, require_email, require_text};
use crate::core::{ColumnValue, Columns, Entity, Result, Validate};

const MAX_NAME_LEN: usize = 100;
const MAX_ROLE_LEN: usize = 60;

/// A person contracts can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Coworker {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /coworkers body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCoworkerDto {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// PUT /coworkers/{id} body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCoworkerDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Validate for CreateCoworkerDto {
    fn validate(&self) -> Result<()> {
        require_text("name", &self.name, MAX_NAME_LEN)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        optional_text("role", self.role.as_deref(), MAX_ROLE_LEN)
    }
}

impl Validate for UpdateCoworkerDto {
    fn validate(&self) -> Result<()> {
        optional_text("name", self.name.as_deref(), MAX_NAME_LEN)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        optional_text("role", self.role.as_deref(), MAX_ROLE_LEN)
    }
}

impl Columns for CreateCoworkerDto {
    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("email", self.email.clone().into()),
            ("role", self.role.clone().into()),
        ]
    }
}

impl Columns for UpdateCoworkerDto {
    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        let mut columns = Vec::new();
        if let Some(name) = &self.name {
            columns.push(("name", name.clone().into()));
        }
        if let Some(email) = &self.email {
            columns.push(("email", email.clone().into()));
        }
        if let Some(role) = &self.role {
            columns.push(("role", role.clone().into()));
        }
        columns
    }
}

impl Entity for Coworker {
    type Create = CreateCoworkerDto;
    type Update = UpdateCoworkerDto;

    const NAME: &'static str = "Coworker";
    const TABLE: &'static str = "coworkers";
    const PATH: &'static str = "/coworkers";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "email", "role", "created_at", "updated_at"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_create(id: String, data: &CreateCoworkerDto, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name.clone(),
            email: data.email.clone(),
            role: data.role.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, data: &UpdateCoworkerDto, now: DateTime<Utc>) {
        if let Some(name) = &data.name {
            self.name = name.clone();
        }
        if let Some(email) = &data.email {
            self.email = Some(email.clone());
        }
        if let Some(role) = &data.role {
            self.role = Some(role.clone());
        }
        self.updated_at = now;
    }
}
