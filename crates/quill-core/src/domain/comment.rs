use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Owned, required_text};
use crate::error::DomainError;

const TEXT_REQUIRED: &str = "Comment text required";

/// Comment entity - a note left by any user on any blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment by `user_id` on `blog_id`.
    pub fn new(blog_id: Uuid, user_id: Uuid, text: Option<&str>) -> Result<Self, DomainError> {
        let text = required_text(text, TEXT_REQUIRED)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            blog_id,
            user_id,
            text,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the comment text.
    pub fn edit(&mut self, text: Option<&str>) -> Result<(), DomainError> {
        self.text = required_text(text, TEXT_REQUIRED)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Owned for Comment {
    const ENTITY: &'static str = "Comment";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// A comment together with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_comment_is_rejected() {
        let result = Comment::new(Uuid::new_v4(), Uuid::new_v4(), Some("  \n "));
        assert_eq!(
            result.unwrap_err(),
            DomainError::Validation(TEXT_REQUIRED.to_string())
        );
    }

    #[test]
    fn edit_keeps_text_on_failure() {
        let mut comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), Some("first")).unwrap();

        assert!(comment.edit(None).is_err());
        assert_eq!(comment.text, "first");

        comment.edit(Some(" second ")).unwrap();
        assert_eq!(comment.text, "second");
    }
}
