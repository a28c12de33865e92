//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod comments;
mod health;
mod pages;


use actix_web::web;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::Owned;
use quill_core::ports::OwnedRepository;

use crate::middleware::auth::AuthGate;
use crate::middleware::error::{AppError, AppResult};

/// Look up a row owned by `owner_id`, treating a foreign row as missing.
pub(crate) async fn find_owned_or_404<T, R>(repo: &R, id: Uuid, owner_id: Uuid) -> AppResult<T>
where
    T: Owned,
    R: OwnedRepository<T> + ?Sized,
{
    repo.find_owned(id, owner_id)
        .await?
        .ok_or_else(|| DomainError::not_found(T::ENTITY, id).into())
}

/// Reject bodies that are not the JSON the endpoint expects with a 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::MalformedBody(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/register")
                .route(web::get().to(pages::register_page))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/logout")
                .route(web::get().to(auth::logout))
                .route(web::post().to(auth::logout)),
        )
        // Gated by the Identity extractor
        .route("/", web::get().to(pages::home))
        // Gated resources: every method goes through AuthGate
        .service(
            web::resource("/blogs")
                .wrap(AuthGate)
                .route(web::get().to(blogs::list))
                .route(web::post().to(blogs::create)),
        )
        .service(
            web::resource("/blogs/{id}")
                .wrap(AuthGate)
                .route(web::get().to(blogs::read))
                .route(web::put().to(blogs::update))
                .route(web::delete().to(blogs::delete)),
        )
        .service(
            web::resource("/blogs/{id}/detail")
                .wrap(AuthGate)
                .route(web::get().to(comments::blog_page))
                .route(web::post().to(comments::create)),
        )
        .service(
            web::resource("/comments/{id}")
                .wrap(AuthGate)
                .route(web::put().to(comments::update))
                .route(web::delete().to(comments::delete))
                .default_service(web::to(comments::method_not_allowed)),
        );
}
