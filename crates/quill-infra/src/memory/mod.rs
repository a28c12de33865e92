//! In-memory repositories - used when no database is configured, and in tests.
//!
//! All tables sit behind one async `RwLock` so a blog delete can cascade to
//! its comments atomically. Data is lost on process restart.

mod tables;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Blog, BlogEntry, Comment, CommentEntry, Owned, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, BlogRepository, CommentRepository, OwnedRepository, UserRepository,
};

use tables::{Stored, Tables};

/// Shared backing store; hand out typed repositories with [`InMemoryStore::users`] etc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryRepository::new(self.clone())
    }

    pub fn blogs(&self) -> InMemoryBlogRepository {
        InMemoryRepository::new(self.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryRepository::new(self.clone())
    }
}

/// Generic in-memory repository over one table of the store.
pub struct InMemoryRepository<T> {
    store: InMemoryStore,
    _entity: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryBlogRepository = InMemoryRepository<Blog>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

#[async_trait]
impl<T: Stored> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables).get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.store.tables.write().await;
        entity.check_insert(&tables)?;

        let table = T::table_mut(&mut tables);
        if table.contains_key(&entity.key()) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        table.insert(entity.key(), entity.clone());

        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.store.tables.write().await;

        match T::table_mut(&mut tables).get_mut(&entity.key()) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl<T: Stored + Owned> OwnedRepository<T> for InMemoryRepository<T> {
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.store.tables.read().await;

        Ok(T::table(&tables)
            .get(&id)
            .filter(|row| row.is_owned_by(owner_id))
            .cloned())
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;

        let owned = T::table(&tables)
            .get(&id)
            .is_some_and(|row| row.is_owned_by(owner_id));
        if !owned {
            return Err(RepoError::NotFound);
        }

        T::table_mut(&mut tables).remove(&id);
        T::cascade(id, &mut tables);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn list_feed(&self) -> Result<Vec<BlogEntry>, RepoError> {
        let tables = self.store.tables.read().await;

        let mut entries: Vec<BlogEntry> = tables
            .blogs
            .values()
            .map(|blog| BlogEntry {
                blog: blog.clone(),
                author: tables.username(blog.user_id),
            })
            .collect();
        entries.sort_by(|a, b| b.blog.created_at.cmp(&a.blog.created_at));

        Ok(entries)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_blog(&self, blog_id: Uuid) -> Result<Vec<CommentEntry>, RepoError> {
        let tables = self.store.tables.read().await;

        let mut entries: Vec<CommentEntry> = tables
            .comments
            .values()
            .filter(|c| c.blog_id == blog_id)
            .map(|comment| CommentEntry {
                comment: comment.clone(),
                author: tables.username(comment.user_id),
            })
            .collect();
        entries.sort_by_key(|e| e.comment.created_at);

        Ok(entries)
    }
}

#[cfg(test)]
mod tests;
