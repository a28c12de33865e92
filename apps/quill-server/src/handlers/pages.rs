//! HTML page handlers.

use actix_web::{HttpResponse, http::header};

use crate::middleware::auth::Identity;
use crate::views;

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}

/// GET /
pub async fn home(_identity: Identity) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/blogs"))
        .finish()
}

/// GET /login
pub async fn login_page() -> HttpResponse {
    html(views::LOGIN_PAGE)
}

/// GET /register
pub async fn register_page() -> HttpResponse {
    html(views::REGISTER_PAGE)
}
