use crate::config::WeeklyConfig;
use crate::database::WeeklyRepository;
use crate::database::sqlite::SqliteRepository;
use crate::features::views::admin::AdminController;
use anyhow::Context;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod response;
mod router;
mod validation;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn WeeklyRepository>,
    pub admin: Arc<AdminController>,
    pub http: reqwest::Client,
    pub config: Arc<WeeklyConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weekly_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WeeklyConfig::from_env();
    let shared_config = Arc::new(config.clone());

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::info!("No database at {}, creating...", config.database_url);
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let http = reqwest::Client::new();
    let admin = AdminController::new(config.admin_mode, config.admin_source(), http.clone());
    tracing::info!(mode = ?admin.mode(), "Admin page configured");

    let app_state = AppState {
        repo: Arc::new(SqliteRepository::new(pool)),
        admin: Arc::new(admin),
        http,
        config: shared_config,
    };

    let app = router::build_app_router(app_state, &config.static_dir);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
