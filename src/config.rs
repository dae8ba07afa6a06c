use crate::features::views::source::WeekSource;
use std::path::PathBuf;

/// Whether admin page edits stay in memory or go through the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminMode {
    #[default]
    Local,
    Live,
}

impl AdminMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Some(AdminMode::Local),
            "live" => Some(AdminMode::Live),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WeeklyConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub weeks_json: String,
    pub admin_mode: AdminMode,
    pub api_base_url: String,
}

impl WeeklyConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("Failed to determine DATABASE_URL from environment variables");

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(5);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(3000);

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()));

        let weeks_json = std::env::var("WEEKS_JSON")
            .unwrap_or_else(|_| static_dir.join("weeks.json").to_string_lossy().to_string());

        let admin_mode = match std::env::var("ADMIN_MODE") {
            Ok(raw) => AdminMode::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unrecognized ADMIN_MODE '{}', using local", raw);
                AdminMode::Local
            }),
            Err(_) => AdminMode::default(),
        };

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}/api", port));

        Self {
            database_url,
            max_connections,
            host,
            port,
            static_dir,
            weeks_json,
            admin_mode,
            api_base_url,
        }
    }

    /// The public list always reads the static collection.
    pub fn list_source(&self) -> WeekSource {
        WeekSource::static_location(&self.weeks_json)
    }

    /// The admin page reads the static collection in local mode and the API
    /// in live mode.
    pub fn admin_source(&self) -> WeekSource {
        match self.admin_mode {
            AdminMode::Local => self.list_source(),
            AdminMode::Live => WeekSource::LiveApi(self.api_base_url.clone()),
        }
    }
}
