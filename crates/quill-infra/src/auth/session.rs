//! JWT-backed session service.
//!
//! The session token is a signed JWT carried in a cookie. Ending a session
//! puts its id (`jti`) on a revocation list until the token would have
//! expired anyway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::UserId;
use quill_core::ports::{AuthError, IssuedSession, RevocationList, SessionClaims, SessionService};

pub const DEFAULT_SESSION_SECRET: &str = "change-me-in-production";

/// Longest session lifetime honoured, one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Session service configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SESSION_SECRET.to_string(),
            ttl_hours: 24,
            issuer: "quill".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| DEFAULT_SESSION_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SESSION_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SESSION_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
            }
        }

        Self {
            secret,
            ttl_hours: parse_ttl_hours(std::env::var("SESSION_TTL_HOURS").ok().as_deref()),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "quill".to_string()),
        }
    }
}

/// Session lifetime from its raw setting: 24 hours when unset or garbled,
/// otherwise held between one hour and a year.
fn parse_ttl_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|hours| hours.clamp(1, MAX_SESSION_TTL_HOURS))
        .unwrap_or(24)
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    jti: String, // session id
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based session service.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
    revoked: Arc<dyn RevocationList>,
}

impl JwtSessionService {
    pub fn new(mut config: SessionConfig, revoked: Arc<dyn RevocationList>) -> Self {
        config.ttl_hours = config.ttl_hours.min(MAX_SESSION_TTL_HOURS);
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
            revoked,
        }
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(SessionClaims {
            session_id: token_data.claims.jti,
            user_id,
            expires_at: token_data.claims.exp,
        })
    }
}

#[async_trait]
impl SessionService for JwtSessionService {
    fn start(&self, user_id: UserId) -> Result<IssuedSession, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        tracing::debug!(user_id, session_id = %claims.jti, "Session started");

        Ok(IssuedSession {
            token,
            claims: SessionClaims {
                session_id: claims.jti,
                user_id,
                expires_at: claims.exp,
            },
        })
    }

    async fn resolve(&self, token: &str) -> Option<SessionClaims> {
        let claims = match self.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                return None;
            }
        };

        if self.revoked.is_revoked(&claims.session_id).await {
            return None;
        }

        Some(claims)
    }

    async fn end(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.decode(token)?;
        let remaining = (claims.expires_at - Utc::now().timestamp()).max(0) as u64;

        self.revoked
            .revoke(&claims.session_id, Duration::from_secs(remaining))
            .await
            .map_err(|e| AuthError::Revocation(e.to_string()))?;

        tracing::debug!(user_id = claims.user_id, session_id = %claims.session_id, "Session ended");
        Ok(())
    }

    fn ttl_seconds(&self) -> i64 {
        self.config.ttl_hours * 3600
    }
}
