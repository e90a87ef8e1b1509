//! Database connection pool construction.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connection settings for [`connect`] and [`connect_lazy`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a connection. Keeps an unreachable
    /// database from hanging requests.
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Open the pool, failing if the first connection cannot be established.
pub async fn connect(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    settings.options().connect(&settings.url).await
}

/// Build the pool without connecting; connections are opened on first use.
pub fn connect_lazy(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    settings.options().connect_lazy(&settings.url)
}

/// Apply the embedded migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
