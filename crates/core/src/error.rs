use crate::types::DbId;

/// Domain error taxonomy shared by every PrepVault crate.
///
/// The HTTP layer maps each variant to a status code; nothing in here knows
/// about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required input field is missing or a value is outside its vocabulary.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No caller identity could be resolved.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A caller identity was resolved but does not own the record.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Require that `caller_id` owns a record belonging to `owner_id`.
///
/// Every mutation on a specific Problem or Topic goes through this check
/// before any write is issued.
pub fn ensure_owner(entity: &'static str, owner_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have access to this {}",
            entity.to_lowercase()
        )))
    }
}

/// Return the trimmed value of a required text field, or a validation error
/// naming the field when it is absent or blank.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!("Missing required field: {field}"))),
    }
}
