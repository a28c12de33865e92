//! Authentication gate and identity extractor.
//!
//! A request is authenticated when it carries a valid session token, either in
//! the session cookie set at login or as an `Authorization: Bearer` header.
//! Unauthenticated requests are redirected to the login page before any
//! handler code runs.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

use quill_core::ports::{AuthError, TokenClaims, TokenService};

use crate::config::SessionConfig;
use crate::middleware::error::{AppError, LOGIN_PATH};
use crate::state::AppState;

/// Authenticated user identity.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

fn session_token(req: &HttpRequest, session: &SessionConfig) -> Option<String> {
    if let Some(cookie) = req.cookie(&session.cookie_name) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolve the caller's identity from the request's session token.
pub fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    let token = session_token(req, &state.session).ok_or(AuthError::MissingAuth)?;
    state.tokens.validate_token(&token).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Already resolved by AuthGate.
        if let Some(identity) = req.extensions().get::<Identity>() {
            return ready(Ok(identity.clone()));
        }

        ready(authenticate(req).map_err(|reason| {
            tracing::debug!(path = %req.path(), %reason, "Unauthenticated request");
            AppError::Unauthenticated
        }))
    }
}

/// Middleware that gates every route of the wrapped service behind a session.
///
/// Wrap a resource to cover all of its methods at once:
/// ```ignore
/// web::resource("/blogs")
///     .wrap(AuthGate)
///     .route(web::get().to(list))
///     .route(web::post().to(create))
/// ```
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService { service }))
    }
}

pub struct AuthGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(req.request()) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(reason) => {
                tracing::debug!(
                    method = %req.method(),
                    path = %req.path(),
                    %reason,
                    "Redirecting unauthenticated request to login"
                );

                let response = HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, LOGIN_PATH))
                    .finish();

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(session: &SessionConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(session.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(session.secure)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop the session.
pub fn removal_cookie(session: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(session.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    use quill_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

    fn state() -> AppState {
        AppState::in_memory(
            Arc::new(JwtTokenService::new(JwtConfig::default())),
            Arc::new(Argon2PasswordService::new()),
            SessionConfig::default(),
        )
    }

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.username)
    }

    #[actix_web::test]
    async fn gate_redirects_without_session() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).service(
                web::resource("/private")
                    .wrap(AuthGate)
                    .route(web::get().to(whoami))
                    .route(web::post().to(whoami)),
            ),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/private").to_request(),
            test::TestRequest::post().uri("/private").to_request(),
        ] {
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert_eq!(res.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
        }
    }

    #[actix_web::test]
    async fn gate_accepts_cookie_and_bearer() {
        let state = state();
        let token = state
            .tokens
            .generate_token(uuid::Uuid::new_v4(), "alice")
            .unwrap();
        let app = test::init_service(
            App::new().app_data(web::Data::new(state.clone())).service(
                web::resource("/private")
                    .wrap(AuthGate)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/private")
            .cookie(session_cookie(&state.session, token.clone(), 60))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn gate_rejects_tampered_token() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state())).service(
                web::resource("/private")
                    .wrap(AuthGate)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/private")
            .cookie(Cookie::new("quill_session", "not-a-token"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn extractor_gates_plain_functions() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
    }
}
