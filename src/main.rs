use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use companies_api::app::{app, AppState};
use companies_api::config;
use companies_api::database::{
    DatabaseManager, MemoryCompanyStore, MemoryUserStore, PgCompanyStore, PgUserStore,
};

#[derive(Parser)]
#[command(name = "companies-api")]
#[command(about = "HTTP service for the companies resource")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Use in-memory stores instead of Postgres")]
    memory: bool,

    #[arg(
        long = "seed-user",
        value_name = "USERNAME:PASSWORD",
        help = "Credentials accepted by the in-memory user store (repeatable)"
    )]
    seed_users: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so MY_HOST, MY_DB_NAME etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Companies API in {:?} mode", config.environment);

    let (state, database) = if args.memory {
        let users = args
            .seed_users
            .iter()
            .try_fold(MemoryUserStore::new(), |users, pair| {
                pair.split_once(':')
                    .map(|(name, password)| users.with_user(name, password))
                    .with_context(|| format!("--seed-user expects USERNAME:PASSWORD, got {}", pair))
            })?;
        tracing::warn!("Using in-memory stores; data is lost on exit");
        (
            AppState::new(Arc::new(MemoryCompanyStore::new()), Arc::new(users)),
            None,
        )
    } else {
        let database = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        let state = AppState::new(
            Arc::new(PgCompanyStore::new(database.pool())),
            Arc::new(PgUserStore::new(database.pool())),
        );
        (state, Some(database))
    };

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Companies API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
