//! Application settings, read from `settings.toml` with an environment
//! overlay (`KAKEIBO__SERVER__CRON_SECRET=...` style keys).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// In-memory database, lost on shutdown. Useful for local trials.
    Memory,
    /// SQLite file at the given path, created on first run.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// Shared secret expected by the subscription billing trigger.
    pub cron_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("KAKEIBO").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
