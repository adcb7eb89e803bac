use crate::core::{AppError, Result};

/// Shape checks run on an input payload before it reaches a service
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reject blank strings and strings longer than `max_len` characters
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} cannot be empty", field)));
    }

    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }

    Ok(())
}

/// Same as [`require_text`] for optional fields; `None` passes
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<()> {
    match value {
        Some(v) => require_text(field, v, max_len),
        None => Ok(()),
    }
}

/// Minimal address shape check: one `@` with text on both sides and a dot in the domain
pub fn require_email(field: &str, value: &str) -> Result<()> {
    require_text(field, value, 254)?;

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(AppError::validation(format!(
            "{} must be a valid email address",
            field
        )));
    }

    Ok(())
}
