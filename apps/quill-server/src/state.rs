//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    BlogRepository, CommentRepository, PasswordService, TokenService, UserRepository,
};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresBlogRepository, PostgresCommentRepository,
    PostgresUserRepository,
};

use crate::config::{AppConfig, SessionConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub session: SessionConfig,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to in-memory repositories when no database is configured or
    /// the connection fails.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        blogs: Arc::new(PostgresBlogRepository::new(conn.main.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
                        tokens,
                        passwords,
                        session: config.session.clone(),
                        db: Some(conn),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(tokens, passwords, config.session.clone())
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        session: SessionConfig,
    ) -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            blogs: Arc::new(store.blogs()),
            comments: Arc::new(store.comments()),
            tokens,
            passwords,
            session,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
