//! Data Transfer Objects - request/response types for the API.
//!
//! Text fields on requests are optional: a missing field is a validation
//! failure, not a malformed body.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Create or replace a blog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Add a comment to a blog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Replace the text of a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditCommentRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// A single blog as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Acknowledgement of a newly created blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreatedResponse {
    pub success: bool,
    pub id: String,
}

/// A freshly posted comment, echoed back for immediate display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    pub id: String,
    pub username: String,
    pub text: String,
    /// Always "just now"; the page shows relative times.
    pub time: String,
    pub is_owner: bool,
}
