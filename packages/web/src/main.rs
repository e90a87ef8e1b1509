//! Slugnotes HTTP server.

use anyhow::Context;
use api::PgStore;
use tokio::net::TcpListener;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use settings::Settings;
use state::AppState;

mod error;
mod extract;
mod routes;
mod session;
mod settings;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new().context("failed to load settings")?;
    init_tracing(&settings.log);

    launch_server(settings).await
}

fn init_tracing(log: &settings::Log) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn launch_server(settings: Settings) -> anyhow::Result<()> {
    let pool = api::db::connect(&settings.database.pool())
        .await
        .context("failed to connect to database")?;

    api::db::migrate(&pool)
        .await
        .context("failed to run migrations")?;

    api::auth::prepare_decoy_blocking()
        .await
        .context("failed to prepare decoy password hash")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            settings.session.expiry_days,
        )));

    let app = routes::router(AppState::new(PgStore::new(pool))).layer(session_layer);

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.addr))?;
    tracing::info!(addr = %settings.server.addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
