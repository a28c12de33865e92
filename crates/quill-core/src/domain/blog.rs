use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Owned, required_text};
use crate::error::DomainError;

const TITLE_AND_CONTENT_REQUIRED: &str = "Title and content required";

/// Blog entity - a post written by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog owned by `user_id`.
    ///
    /// Title and content are trimmed and must not end up empty.
    pub fn new(
        user_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, DomainError> {
        let (title, content) = Self::validate(title, content)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace title and content. Leaves the blog untouched when either is blank.
    pub fn revise(&mut self, title: Option<&str>, content: Option<&str>) -> Result<(), DomainError> {
        let (title, content) = Self::validate(title, content)?;
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn validate(
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(String, String), DomainError> {
        Ok((
            required_text(title, TITLE_AND_CONTENT_REQUIRED)?,
            required_text(content, TITLE_AND_CONTENT_REQUIRED)?,
        ))
    }
}

impl Owned for Blog {
    const ENTITY: &'static str = "Blog";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// A blog together with its author's username, as shown in the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogEntry {
    pub blog: Blog,
    pub author: String,
}
