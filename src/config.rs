// habit_backend/src/config.rs
use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_PATH: &str = "habits.db";
const DEFAULT_SECRET_KEY: &str = "dev-key-change-in-production";
const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, resolved once at startup and passed explicitly to
/// `rocket_instance`. Tests construct it directly against a throwaway
/// database path.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub secret_key: String,
    pub debug: bool,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment (and a `.env` file, if
    /// present), falling back to development defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        AppConfig {
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH)),
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
            debug: env::var("DEBUG")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// The Diesel connection string: for SQLite, simply the file path.
    pub fn database_url(&self) -> String {
        self.database_path.display().to_string()
    }
}
