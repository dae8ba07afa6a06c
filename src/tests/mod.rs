use crate::AppState;
use crate::config::{AdminMode, WeeklyConfig};
use crate::database::WeeklyRepository;
use crate::database::sqlite::SqliteRepository;
use crate::features::views::admin::AdminController;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;

mod unit_validation_helpers;
mod unit_views_renderers;

// a fresh in-memory database with the schema applied; one connection so
// every query sees the same database
pub async fn setup_test_repo() -> SqliteRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    SqliteRepository::new(pool)
}

pub fn test_config(weeks_json: &str) -> WeeklyConfig {
    WeeklyConfig {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        static_dir: PathBuf::from("./static"),
        weeks_json: weeks_json.into(),
        admin_mode: AdminMode::Local,
        api_base_url: "".into(),
    }
}

pub fn state_with_repo(repo: Arc<dyn WeeklyRepository>, config: WeeklyConfig) -> AppState {
    let http = reqwest::Client::new();
    let admin = AdminController::new(config.admin_mode, config.admin_source(), http.clone());

    AppState {
        repo,
        admin: Arc::new(admin),
        http,
        config: Arc::new(config),
    }
}

pub async fn setup_test_state() -> AppState {
    let repo = setup_test_repo().await;
    state_with_repo(Arc::new(repo), test_config("./static/weeks.json"))
}
