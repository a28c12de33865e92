//! Blog detail page and comment CRUD.
//!
//! Anyone signed in may read a blog's page and comment on it; only a
//! comment's author may edit or delete it.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use quill_core::{DomainError, RepoError};
use quill_core::domain::{Blog, Comment, Owned};
use quill_core::ports::{BaseRepository, CommentRepository, OwnedRepository};
use quill_shared::ActionResponse;
use quill_shared::dto::{CommentResponse, EditCommentRequest, NewCommentRequest};

use super::find_owned_or_404;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

async fn blog_or_404(state: &AppState, blog_id: Uuid) -> AppResult<Blog> {
    state
        .blogs
        .find_by_id(blog_id)
        .await?
        .ok_or_else(|| DomainError::not_found(Blog::ENTITY, blog_id).into())
}

/// The blog can disappear between the lookup and the insert.
fn insert_error(err: RepoError, blog_id: Uuid) -> AppError {
    match err {
        RepoError::ForeignKey(constraint) => {
            tracing::warn!(%constraint, %blog_id, "Blog removed before comment insert");
            DomainError::not_found(Blog::ENTITY, blog_id).into()
        }
        other => other.into(),
    }
}

/// GET /blogs/{id}/detail
pub async fn blog_page(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blog = blog_or_404(&state, path.into_inner()).await?;
    let author = state
        .users
        .find_by_id(blog.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    let comments = state.comments.list_for_blog(blog.id).await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::blog_detail(
            &identity.username,
            identity.user_id,
            &blog,
            &author,
            &comments,
        )))
}

/// POST /blogs/{id}/detail
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let blog = blog_or_404(&state, path.into_inner()).await?;

    let comment = Comment::new(blog.id, identity.user_id, body.comment.as_deref())?;
    let comment = state
        .comments
        .insert(comment)
        .await
        .map_err(|e| insert_error(e, blog.id))?;

    tracing::info!(comment_id = %comment.id, blog_id = %blog.id, "Comment added");

    Ok(HttpResponse::Ok().json(CommentResponse {
        success: true,
        id: comment.id.to_string(),
        username: identity.username,
        text: comment.text,
        time: "just now".to_string(),
        is_owner: true,
    }))
}

/// PUT /comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<EditCommentRequest>,
) -> AppResult<HttpResponse> {
    let mut comment: Comment =
        find_owned_or_404(&*state.comments, path.into_inner(), identity.user_id).await?;

    comment.edit(body.text.as_deref())?;
    state.comments.update(comment).await?;

    Ok(HttpResponse::Ok().json(ActionResponse::ok()))
}

/// DELETE /comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    state
        .comments
        .delete_owned(comment_id, identity.user_id)
        .await?;

    tracing::info!(%comment_id, "Comment deleted");

    Ok(HttpResponse::Ok().json(ActionResponse::ok()))
}

/// Any other method on /comments/{id}.
pub async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn comment_on_vanished_blog_is_not_found() {
        let blog_id = Uuid::new_v4();

        let err = insert_error(RepoError::ForeignKey("fk_comments_blog_id".into()), blog_id);

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains(&blog_id.to_string()));
        assert!(!err.to_string().contains("fk_comments_blog_id"));
    }
}
