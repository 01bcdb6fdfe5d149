//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_core::domain::AdminPolicy;
use quill_infra::{DatabaseConfig, PasswordConfig, SessionConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";

/// Room for long post bodies; actix's own default is 16 KiB.
const DEFAULT_FORM_LIMIT: usize = 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub session: SessionConfig,
    /// Mark the session cookie `Secure` (HTTPS only).
    pub cookie_secure: bool,
    pub admin_policy: AdminPolicy,
    pub password: PasswordConfig,
    /// Time allowed for a client to send the request head.
    pub request_timeout: Duration,
    /// Largest urlencoded form body accepted, in bytes.
    pub form_limit: usize,
    pub templates_glob: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database: DatabaseConfig::new(DEFAULT_DATABASE_URL),
            run_migrations: true,
            session: SessionConfig::default(),
            cookie_secure: false,
            admin_policy: AdminPolicy::FirstUser,
            password: PasswordConfig::default(),
            request_timeout: Duration::from_secs(30),
            form_limit: DEFAULT_FORM_LIMIT,
            templates_glob: default_templates_glob(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut database = DatabaseConfig::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        );
        database.max_connections = parse_var("DB_MAX_CONNECTIONS", database.max_connections);
        database.min_connections = parse_var("DB_MIN_CONNECTIONS", database.min_connections);
        database.acquire_timeout = Duration::from_secs(parse_var(
            "DB_ACQUIRE_TIMEOUT_SECS",
            database.acquire_timeout.as_secs(),
        ));

        let admin_policy = match env::var("ADMIN_EMAIL") {
            Ok(email) if !email.trim().is_empty() => AdminPolicy::Email(email.trim().to_string()),
            _ => AdminPolicy::FirstUser,
        };

        let mut password = defaults.password;
        password.salt_len_min = parse_var("PASSWORD_SALT_MIN", password.salt_len_min);
        password.salt_len_max = parse_var("PASSWORD_SALT_MAX", password.salt_len_max);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            database,
            run_migrations: parse_flag("RUN_MIGRATIONS", defaults.run_migrations),
            session: SessionConfig::from_env(),
            cookie_secure: parse_flag("COOKIE_SECURE", defaults.cookie_secure),
            admin_policy,
            password,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            form_limit: parse_var("FORM_LIMIT_BYTES", defaults.form_limit),
            templates_glob: env::var("TEMPLATES_GLOB").unwrap_or(defaults.templates_glob),
        }
    }
}

fn default_templates_glob() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html").to_string()
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
        .unwrap_or(default)
}
