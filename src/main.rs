use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use mygram_api::{
    AppState,
    config::{AppConfig, Env},
    create_router, database,
    repository::{PostgresRepository, RepositoryState},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment: a local `.env` file is only consulted outside production.
    let env = Env::from_env();
    let dotenv_result = match env {
        Env::Local => Some(dotenv::dotenv()),
        Env::Production => None,
    };

    let config = AppConfig::load_for(env).context("invalid configuration")?;

    // 2. Logging: pretty for humans locally, JSON for log aggregation in production.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mygram_api=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    if let Some(Err(e)) = dotenv_result {
        tracing::warn!("no .env file loaded: {e}");
    }
    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Persistence gateway: one pool for the whole process, schema brought up to date.
    let pool = database::connect(&config.database)
        .await
        .context("failed to connect to Postgres; check the DB_* variables")?;
    database::migrate(&pool)
        .await
        .context("failed to migrate the database schema")?;

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 4. Router and server.
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState { repo, config });

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on {addr}");
    tracing::info!("API documentation available at http://localhost:{}/docs", addr.port());

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
