use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result, Validate};

/// `contract_values.amount` is DECIMAL(19,4)
const AMOUNT_SCALE: u32 = 4;
const AMOUNT_INTEGER_DIGITS: u32 = 15;

/// One entry in a contract's value history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContractValue {
    pub id: String,
    pub contract_id: String,
    pub amount: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl ContractValue {
    pub fn new(id: String, contract_id: String, value: &NewContractValue) -> Self {
        Self {
            id,
            contract_id,
            amount: value.amount,
            recorded_at: value.recorded_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Most recent entry by `recorded_at`; on equal timestamps the later element wins
pub fn latest<'a, I>(values: I) -> Option<&'a ContractValue>
where
    I: IntoIterator<Item = &'a ContractValue>,
{
    values.into_iter().fold(None, |best, value| match best {
        Some(current) if current.recorded_at > value.recorded_at => Some(current),
        _ => Some(value),
    })
}

/// POST /contracts/{id}/values body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContractValue {
    pub amount: Decimal,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl NewContractValue {
    pub fn new(amount: Decimal, recorded_at: Option<DateTime<Utc>>) -> Self {
        Self {
            amount,
            recorded_at,
        }
    }
}

/// Non-negative and representable in the amount column without rounding
pub fn validate_amount(field: &str, amount: &Decimal) -> Result<()> {
    if amount.is_sign_negative() {
        return Err(AppError::validation(format!("{} cannot be negative", field)));
    }

    if amount.scale() > AMOUNT_SCALE {
        return Err(AppError::validation(format!(
            "{} allows at most {} decimal places",
            field, AMOUNT_SCALE
        )));
    }

    let limit = Decimal::from(10i64.pow(AMOUNT_INTEGER_DIGITS));
    if amount.trunc() >= limit {
        return Err(AppError::validation(format!(
            "{} allows at most {} integer digits",
            field, AMOUNT_INTEGER_DIGITS
        )));
    }

    Ok(())
}

impl Validate for NewContractValue {
    fn validate(&self) -> Result<()> {
        validate_amount("amount", &self.amount)
    }
}
