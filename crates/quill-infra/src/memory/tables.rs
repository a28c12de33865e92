use std::collections::HashMap;

use uuid::Uuid;

use quill_core::domain::{Blog, Comment, User};
use quill_core::error::RepoError;

#[derive(Default)]
pub struct Tables {
    pub users: HashMap<Uuid, User>,
    pub blogs: HashMap<Uuid, Blog>,
    pub comments: HashMap<Uuid, Comment>,
}

impl Tables {
    pub fn username(&self, user_id: Uuid) -> String {
        self.users
            .get(&user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

/// A row type with its own table in [`Tables`].
///
/// `check_insert` and `cascade` mirror the unique and foreign-key
/// constraints of the SQL schema.
pub trait Stored: Clone + Send + Sync + 'static {
    fn key(&self) -> Uuid;

    fn table(tables: &Tables) -> &HashMap<Uuid, Self>;

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;

    fn check_insert(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    fn cascade(_id: Uuid, _tables: &mut Tables) {}
}

impl Stored for User {
    fn key(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.users
    }

    fn check_insert(&self, tables: &Tables) -> Result<(), RepoError> {
        for existing in tables.users.values() {
            if existing.username == self.username {
                return Err(RepoError::Constraint("username already exists".to_string()));
            }
            if existing.email == self.email {
                return Err(RepoError::Constraint("email already exists".to_string()));
            }
        }
        Ok(())
    }
}

impl Stored for Blog {
    fn key(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.blogs
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.blogs
    }

    fn check_insert(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.users.contains_key(&self.user_id) {
            return Err(RepoError::ForeignKey("blog owner does not exist".to_string()));
        }
        Ok(())
    }

    fn cascade(id: Uuid, tables: &mut Tables) {
        tables.comments.retain(|_, c| c.blog_id != id);
    }
}

impl Stored for Comment {
    fn key(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.comments
    }

    fn check_insert(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.blogs.contains_key(&self.blog_id) {
            return Err(RepoError::ForeignKey("blog does not exist".to_string()));
        }
        if !tables.users.contains_key(&self.user_id) {
            return Err(RepoError::ForeignKey("comment owner does not exist".to_string()));
        }
        Ok(())
    }
}
