//! Standardized API response types (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

/// Outcome of a form-style action such as register, login or a blog edit.
///
/// Failures carry the offending `field` when the client should highlight one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            field: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            field: None,
            error: Some(error.into()),
        }
    }

    pub fn field_failure(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            field: Some(field.into()),
            error: Some(error.into()),
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // Common error constructors
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_failure_serializes_field_and_error() {
        let body = serde_json::to_value(ActionResponse::field_failure("username", "taken")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "field": "username", "error": "taken"})
        );
    }

    #[test]
    fn ok_omits_empty_fields() {
        let body = serde_json::to_value(ActionResponse::ok()).unwrap();
        assert_eq!(body, serde_json::json!({"success": true}));
    }

    #[test]
    fn problem_document_uses_type_key() {
        let body = serde_json::to_value(ErrorResponse::not_found("gone")).unwrap();
        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "gone");
    }
}
