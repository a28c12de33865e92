use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use quill_core::domain::{Blog, Comment, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, BlogRepository, CommentRepository, OwnedRepository, UserRepository,
};

use super::InMemoryStore;

async fn user(store: &InMemoryStore, name: &str) -> User {
    store
        .users()
        .insert(User::new(
            name.to_string(),
            format!("{name}@example.com"),
            "hash".to_string(),
        ))
        .await
        .unwrap()
}

async fn blog(store: &InMemoryStore, owner: &User, title: &str) -> Blog {
    let blog = Blog::new(owner.id, Some(title), Some("content")).unwrap();
    store.blogs().insert(blog).await.unwrap()
}

#[tokio::test]
async fn find_owned_hides_other_users_rows() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let post = blog(&store, &alice, "mine").await;

    let blogs = store.blogs();
    assert!(blogs.find_owned(post.id, alice.id).await.unwrap().is_some());
    assert!(blogs.find_owned(post.id, bob.id).await.unwrap().is_none());
    assert!(blogs.find_owned(Uuid::new_v4(), alice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_owned_rejects_non_owner_without_deleting() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let post = blog(&store, &alice, "mine").await;

    let blogs = store.blogs();
    let result = blogs.delete_owned(post.id, bob.id).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
    assert!(blogs.find_by_id(post.id).await.unwrap().is_some());

    blogs.delete_owned(post.id, alice.id).await.unwrap();
    assert!(blogs.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_blog_removes_its_comments() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let post = blog(&store, &alice, "mine").await;
    let other = blog(&store, &alice, "other").await;

    let comments = store.comments();
    comments
        .insert(Comment::new(post.id, bob.id, Some("nice")).unwrap())
        .await
        .unwrap();
    comments
        .insert(Comment::new(other.id, bob.id, Some("also nice")).unwrap())
        .await
        .unwrap();

    store.blogs().delete_owned(post.id, alice.id).await.unwrap();

    assert!(comments.list_for_blog(post.id).await.unwrap().is_empty());
    assert_eq!(comments.list_for_blog(other.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_username_and_email_are_constraint_errors() {
    let store = InMemoryStore::new();
    user(&store, "alice").await;
    let users = store.users();

    let same_name = User::new("alice".into(), "other@example.com".into(), "h".into());
    let same_email = User::new("other".into(), "alice@example.com".into(), "h".into());

    assert!(matches!(
        users.insert(same_name).await,
        Err(RepoError::Constraint(name)) if name.contains("username")
    ));
    assert!(matches!(
        users.insert(same_email).await,
        Err(RepoError::Constraint(name)) if name.contains("email")
    ));
    assert!(users.find_by_username("other").await.unwrap().is_none());
    assert!(users.find_by_email("alice@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn comment_on_missing_blog_is_rejected() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;

    let orphan = Comment::new(Uuid::new_v4(), alice.id, Some("hello")).unwrap();

    assert!(matches!(
        store.comments().insert(orphan).await,
        Err(RepoError::ForeignKey(_))
    ));
}

#[tokio::test]
async fn feed_lists_every_author_newest_first() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;

    let mut older = Blog::new(alice.id, Some("older"), Some("x")).unwrap();
    older.created_at = Utc::now() - TimeDelta::minutes(5);
    store.blogs().insert(older).await.unwrap();
    blog(&store, &bob, "newer").await;

    let feed = store.blogs().list_feed().await.unwrap();

    let titles: Vec<_> = feed.iter().map(|e| e.blog.title.as_str()).collect();
    let authors: Vec<_> = feed.iter().map(|e| e.author.as_str()).collect();
    assert_eq!(titles, ["newer", "older"]);
    assert_eq!(authors, ["bob", "alice"]);
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
    let store = InMemoryStore::new();
    let alice = user(&store, "alice").await;

    let never_saved = Blog::new(alice.id, Some("t"), Some("c")).unwrap();

    assert!(matches!(
        store.blogs().update(never_saved).await,
        Err(RepoError::NotFound)
    ));
}
