use crate::error::DomainError;

/// Trim a required text field, rejecting missing or blank input.
///
/// `message` is reported verbatim in the validation error.
pub fn required_text(value: Option<&str>, message: &str) -> Result<String, DomainError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(DomainError::Validation(message.to_string())),
    }
}
