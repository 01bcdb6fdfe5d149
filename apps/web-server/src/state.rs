//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use quill_core::domain::AdminPolicy;
use quill_core::ports::{
    CommentRepository, PasswordService, PostRepository, RevocationList, SessionService,
    UserRepository,
};
use quill_infra::{
    Argon2PasswordService, InMemoryRevocationList, JwtSessionService, SeaOrmCommentRepository,
    SeaOrmPostRepository, SeaOrmUserRepository,
};

use crate::config::AppConfig;
use crate::views::Views;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<dyn SessionService>,
    pub views: Arc<Views>,
    pub admin_policy: AdminPolicy,
    pub cookie_secure: bool,
    /// Kept for health checks; repositories hold their own handle.
    pub db: Arc<DbConn>,
}

impl AppState {
    /// Wire the store, credential and session services and the templates.
    pub fn new(db: DbConn, config: &AppConfig) -> anyhow::Result<Self> {
        let revocations: Arc<dyn RevocationList> = Arc::new(InMemoryRevocationList::new());
        let sessions = JwtSessionService::new(config.session.clone(), revocations);
        let passwords = Argon2PasswordService::new(config.password.clone())?;
        let views = Views::new(&config.templates_glob)?;
        let db = Arc::new(db);

        tracing::info!(admin_policy = ?config.admin_policy, "Application state initialized");

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            comments: Arc::new(SeaOrmCommentRepository::new(db.clone())),
            passwords: Arc::new(passwords),
            sessions: Arc::new(sessions),
            views: Arc::new(views),
            admin_policy: config.admin_policy.clone(),
            cookie_secure: config.cookie_secure,
            db,
        })
    }
}
