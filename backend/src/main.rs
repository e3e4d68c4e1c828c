//! Backend entry-point: loads settings, prepares the database, and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use forum_backend::ForumSettings;
use forum_backend::inbound::http::health::HealthState;
use forum_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use forum_backend::inbound::http::session_config::{BuildMode, session_settings};
use forum_backend::outbound::persistence::{DbPool, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ForumSettings::load().wrap_err("failed to load forum settings")?;
    let session = session_settings(&settings.session_toggles(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let pool_config = settings.pool_config()?;
    if settings.run_migrations {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply migrations")?;
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(session, bind_addr, pool),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    server.await.wrap_err("server terminated with an error")
}
