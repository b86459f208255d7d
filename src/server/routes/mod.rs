pub mod courses;
pub mod students;

use crate::error::RostraError;

/// Shared `name` validation for create/update payloads.
///
/// Stored as given; only all-whitespace values are rejected.
pub(crate) fn require_name(name: &str) -> Result<String, RostraError> {
    if name.trim().is_empty() {
        return Err(RostraError::Validation(
            "name must not be blank".to_string(),
        ));
    }
    Ok(name.to_string())
}
