use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Transaction};
use uuid::Uuid;

use quill_core::domain::{Blog, Comment, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, OwnedRepository};

use crate::database::entity::{blog, comment};
use crate::database::postgres_repo::{
    PostgresBlogRepository, PostgresCommentRepository, PostgresUserRepository,
};

fn blog_model(id: Uuid, user_id: Uuid) -> blog::Model {
    let now = Utc::now();
    blog::Model {
        id,
        user_id,
        title: "Test Blog".to_owned(),
        content: "Content".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_blog_by_id() {
    let blog_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![blog_model(blog_id, user_id)]])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);

    let result: Option<Blog> = repo.find_by_id(blog_id).await.unwrap();

    let blog = result.unwrap();
    assert_eq!(blog.title, "Test Blog");
    assert_eq!(blog.id, blog_id);
}

#[tokio::test]
async fn test_find_owned_filters_by_id_and_owner() {
    let blog_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![blog_model(blog_id, owner_id)]])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);
    let found: Option<Blog> = repo.find_owned(blog_id, owner_id).await.unwrap();
    assert!(found.is_some());

    let log = repo.db.into_transaction_log();
    assert_eq!(
        log,
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "blogs"."id", "blogs"."user_id", "blogs"."title", "blogs"."content", "blogs"."created_at", "blogs"."updated_at" FROM "blogs" WHERE "blogs"."id" = $1 AND "blogs"."user_id" = $2 LIMIT $3"#,
            [blog_id.into(), owner_id.into(), 1u64.into()],
        )]
    );
}

#[tokio::test]
async fn test_find_owned_without_match_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<comment::Model>::new()])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let found: Option<Comment> = repo
        .find_owned(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_delete_owned_with_no_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);

    let result = OwnedRepository::<Blog>::delete_owned(&repo, Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_owned_removes_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);

    let result = OwnedRepository::<Blog>::delete_owned(&repo, Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(result.is_ok());
}

fn postgres_error(message: &str) -> DbErr {
    DbErr::Query(RuntimeErr::Internal(message.to_owned()))
}

#[tokio::test]
async fn test_duplicate_email_keeps_constraint_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([postgres_error(
            r#"duplicate key value violates unique constraint "users_email_key""#,
        )])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = User::new("alice".into(), "alice@example.com".into(), "hash".into());

    let result: Result<User, RepoError> = repo.insert(user).await;

    match result {
        Err(RepoError::Constraint(name)) => assert_eq!(name, "users_email_key"),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_comment_on_deleted_blog_is_foreign_key_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([postgres_error(
            r#"insert or update on table "comments" violates foreign key constraint "fk_comments_blog_id""#,
        )])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), Some("late")).unwrap();

    let result: Result<Comment, RepoError> = repo.insert(comment).await;

    match result {
        Err(RepoError::ForeignKey(name)) => assert_eq!(name, "fk_comments_blog_id"),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_other_failures_stay_query_errors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([postgres_error("canceling statement due to statement timeout")])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);

    let result: Result<Option<Blog>, RepoError> = repo.find_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::Query(_))));
}
