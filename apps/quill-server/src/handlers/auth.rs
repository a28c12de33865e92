//! Registration, login and logout.

use actix_web::{HttpResponse, http::header, web};

use quill_core::{DomainError, RepoError};
use quill_core::domain::{User, required_text};
use quill_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quill_shared::ActionResponse;
use quill_shared::dto::{LoginRequest, RegisterRequest};

use crate::middleware::auth::{removal_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult, LOGIN_PATH};
use crate::state::AppState;

const USERNAME_TAKEN: &str = "Username already exists";
const EMAIL_TAKEN: &str = "Email already exists";

fn taken(field: &'static str, message: &str) -> AppError {
    DomainError::Duplicate {
        field,
        message: message.to_string(),
    }
    .into()
}

/// Lost a race with a concurrent registration; the unique constraint names the column.
fn registration_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Constraint(constraint) if constraint.contains("email") => {
            taken("email", EMAIL_TAKEN)
        }
        RepoError::Constraint(_) => taken("username", USERNAME_TAKEN),
        other => other.into(),
    }
}

fn required_field(field: &'static str, value: Option<&str>, message: &str) -> AppResult<String> {
    required_text(value, message).map_err(|_| AppError::form(field, message))
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let username = required_field("username", req.username.as_deref(), "Username is required")?;
    let email = required_field("email", req.email.as_deref(), "Email is required")?;
    if !email.contains('@') {
        return Err(AppError::form("email", "Invalid email address"));
    }
    // Passwords are taken verbatim, surrounding whitespace included.
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::form("password", "Password is required"))?;

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(taken("username", USERNAME_TAKEN));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(taken("email", EMAIL_TAKEN));
    }

    let password_hash = state
        .passwords
        .hash(&password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(User::new(username, email, password_hash))
        .await
        .map_err(registration_conflict)?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(HttpResponse::Ok().json(ActionResponse::ok()))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let username = req.username.as_deref().map(str::trim).unwrap_or_default();

    let Some(user) = state.users.find_by_username(username).await? else {
        return Err(AppError::form("username", "Username does not exist"));
    };

    let valid = state
        .passwords
        .verify(req.password.as_deref().unwrap_or_default(), &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::info!(user_id = %user.id, "Rejected login with incorrect password");
        return Err(AppError::form("password", "Incorrect password"));
    }

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = session_cookie(&state.session, token, state.tokens.expiration_seconds());

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().cookie(cookie).json(ActionResponse::ok()))
}

/// GET|POST /logout
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .cookie(removal_cookie(&state.session))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(err: AppError) -> &'static str {
        match err {
            AppError::FormRejected { field, .. } => field,
            other => panic!("expected a field rejection, got {other:?}"),
        }
    }

    #[test]
    fn insert_race_reports_the_violated_column() {
        assert_eq!(
            rejected_field(registration_conflict(RepoError::Constraint(
                "users_email_key".into()
            ))),
            "email"
        );
        assert_eq!(
            rejected_field(registration_conflict(RepoError::Constraint(
                "users_username_key".into()
            ))),
            "username"
        );
        assert_eq!(
            rejected_field(registration_conflict(RepoError::Constraint(
                "email already exists".into()
            ))),
            "email"
        );
    }
}
