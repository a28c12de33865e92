use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogEntry, Comment, CommentEntry, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` when it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// Owner-scoped access for entities that belong to a single user.
///
/// Both lookups filter on id and owner in one query, so a row owned by
/// someone else is reported exactly like a missing one.
#[async_trait]
pub trait OwnedRepository<T>: BaseRepository<T, Uuid> {
    /// Find the entity with `id` if and only if `owner_id` owns it.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> Result<Option<T>, RepoError>;

    /// Delete the entity with `id` owned by `owner_id`.
    ///
    /// Returns `RepoError::NotFound` when no such row exists.
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: OwnedRepository<Blog> {
    /// Every blog from every user, newest first.
    async fn list_feed(&self) -> Result<Vec<BlogEntry>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: OwnedRepository<Comment> {
    /// Comments on a blog, oldest first.
    async fn list_for_blog(&self, blog_id: Uuid) -> Result<Vec<CommentEntry>, RepoError>;
}
