use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Upper bound on waiting for a pooled connection; this is the
    /// request-level timeout at the store boundary.
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite") && self.url.contains(":memory:")
    }
}

/// Open the connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let mut opts = ConnectOptions::new(&config.url);
    opts.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    // Every connection to `sqlite::memory:` is a separate database.
    if config.is_sqlite_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }

    let db = Database::connect(opts).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        "Database connected (pool: {})",
        if config.is_sqlite_memory() { 1 } else { config.max_connections }
    );

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(DatabaseConfig::new("sqlite::memory:").is_sqlite_memory());
        assert!(!DatabaseConfig::new("sqlite://blog.db?mode=rwc").is_sqlite_memory());
        assert!(!DatabaseConfig::new("postgres://localhost/blog").is_sqlite_memory());
    }
}
