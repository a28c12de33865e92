//! Blog feed and owner-scoped blog CRUD.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use quill_core::domain::{Blog, BlogEntry};
use quill_core::ports::{BaseRepository, BlogRepository, OwnedRepository};
use quill_shared::ActionResponse;
use quill_shared::dto::{BlogCreatedResponse, BlogRequest, BlogResponse};

use super::find_owned_or_404;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET /blogs - every user's blogs, newest first.
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let entries: Vec<BlogEntry> = state.blogs.list_feed().await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::blog_list(&identity.username, &entries)))
}

/// POST /blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let blog = Blog::new(
        identity.user_id,
        req.title.as_deref(),
        req.content.as_deref(),
    )?;
    let blog = state.blogs.insert(blog).await?;

    tracing::info!(blog_id = %blog.id, user_id = %identity.user_id, "Blog created");

    Ok(HttpResponse::Ok().json(BlogCreatedResponse {
        success: true,
        id: blog.id.to_string(),
    }))
}

/// GET /blogs/{id}
pub async fn read(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blog: Blog = find_owned_or_404(&*state.blogs, path.into_inner(), identity.user_id).await?;

    Ok(HttpResponse::Ok().json(BlogResponse {
        id: blog.id.to_string(),
        title: blog.title,
        content: blog.content,
        created_at: blog.created_at.to_rfc3339(),
        updated_at: blog.updated_at.to_rfc3339(),
    }))
}

/// PUT /blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let mut blog: Blog =
        find_owned_or_404(&*state.blogs, path.into_inner(), identity.user_id).await?;

    let req = body.into_inner();
    blog.revise(req.title.as_deref(), req.content.as_deref())?;
    let blog = state.blogs.update(blog).await?;

    tracing::info!(blog_id = %blog.id, "Blog updated");

    Ok(HttpResponse::Ok().json(ActionResponse::ok()))
}

/// DELETE /blogs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();

    state.blogs.delete_owned(blog_id, identity.user_id).await?;

    tracing::info!(%blog_id, "Blog deleted");

    Ok(HttpResponse::Ok().json(ActionResponse::ok()))
}
