use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::contract_value::{validate_amount, ContractValue};
use crate::core::traits::validate::{optional_text, require_text};
use crate::core::{ColumnValue, Columns, Entity, Result, Validate};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;

/// Contract status.
///
/// Transitions are unrestricted: any status may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::Draft,
        ContractStatus::Active,
        ContractStatus::Closed,
    ];
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::Draft => write!(f, "Draft"),
            ContractStatus::Active => write!(f, "Active"),
            ContractStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(ContractStatus::Draft),
            "Active" => Ok(ContractStatus::Active),
            "Closed" => Ok(ContractStatus::Closed),
            _ => Err(format!("Invalid contract status: {}", s)),
        }
    }
}

impl TryFrom<String> for ContractStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContractStatus> for ColumnValue {
    fn from(status: ContractStatus) -> Self {
        ColumnValue::Text(status.to_string())
    }
}

/// A contract row, optionally joined with its most recent value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub coworker_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Joined from contract_values; not a column
    #[sqlx(skip)]
    #[serde(default)]
    pub latest_value: Option<ContractValue>,
}

impl Contract {
    pub fn with_latest_value(mut self, value: Option<ContractValue>) -> Self {
        self.latest_value = value;
        self
    }
}

/// POST /contracts body: the contract plus its first value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub coworker_id: Option<String>,
    #[serde(default)]
    pub status: ContractStatus,
    pub initial_value: Decimal,
    /// When the initial value takes effect; defaults to now
    #[serde(default)]
    pub value_recorded_at: Option<DateTime<Utc>>,
}

/// PUT /contracts/{id} body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContractDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub coworker_id: Option<String>,
    #[serde(default)]
    pub status: Option<ContractStatus>,
}

/// PUT /contracts/{id}/status body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContractStatusDto {
    pub status: ContractStatus,
}

impl Validate for CreateContractDto {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        optional_text("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        optional_text("coworker_id", self.coworker_id.as_deref(), 36)?;
        validate_amount("initial_value", &self.initial_value)
    }
}

impl Validate for UpdateContractDto {
    fn validate(&self) -> Result<()> {
        optional_text("title", self.title.as_deref(), MAX_TITLE_LEN)?;
        optional_text("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        optional_text("coworker_id", self.coworker_id.as_deref(), 36)
    }
}

impl Validate for UpdateContractStatusDto {
    fn validate(&self) -> Result<()> {
        // Any enumerated status is accepted; deserialization already rejected the rest
        Ok(())
    }
}

impl Columns for CreateContractDto {
    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("title", self.title.clone().into()),
            ("description", self.description.clone().into()),
            ("coworker_id", self.coworker_id.clone().into()),
            ("status", self.status.into()),
        ]
    }
}

impl Columns for UpdateContractDto {
    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        let mut columns = Vec::new();
        if let Some(title) = &self.title {
            columns.push(("title", title.clone().into()));
        }
        if let Some(description) = &self.description {
            columns.push(("description", description.clone().into()));
        }
        if let Some(coworker_id) = &self.coworker_id {
            columns.push(("coworker_id", coworker_id.clone().into()));
        }
        if let Some(status) = self.status {
            columns.push(("status", status.into()));
        }
        columns
    }
}

impl Entity for Contract {
    type Create = CreateContractDto;
    type Update = UpdateContractDto;

    const NAME: &'static str = "Contract";
    const TABLE: &'static str = "contracts";
    const PATH: &'static str = "/contracts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "coworker_id",
        "status",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_create(id: String, data: &CreateContractDto, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title.clone(),
            description: data.description.clone(),
            coworker_id: data.coworker_id.clone(),
            status: data.status,
            created_at: now,
            updated_at: now,
            latest_value: None,
        }
    }

    fn apply_update(&mut self, data: &UpdateContractDto, now: DateTime<Utc>) {
        if let Some(title) = &data.title {
            self.title = title.clone();
        }
        if let Some(description) = &data.description {
            self.description = Some(description.clone());
        }
        if let Some(coworker_id) = &data.coworker_id {
            self.coworker_id = Some(coworker_id.clone());
        }
        if let Some(status) = data.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}
