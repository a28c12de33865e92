//! Domain entities - the core business objects.

mod blog;
mod comment;
mod text;
mod user;

pub use blog::{Blog, BlogEntry};
pub use comment::{Comment, CommentEntry};
pub use text::required_text;
pub use user::User;

use uuid::Uuid;

/// An entity that belongs to exactly one user.
///
/// Owner-scoped lookups match on both the row id and `owner_id()`; a row whose
/// id matches but whose owner does not is indistinguishable from a missing row.
pub trait Owned {
    /// Name used in `NotFound` errors.
    const ENTITY: &'static str;

    fn owner_id(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}
