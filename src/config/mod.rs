use serde::Deserialize;
use std::path::PathBuf;

// Top-level configuration, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
}

// Where uploaded files live; paths stored in the database are relative to `root`
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub root: PathBuf,
}

/// Flat view of the environment, one field per variable.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    environment: String,
    rust_log: String,
    log_format: LogFormat,
    database_url: String,
    db_pool_size: u32,
    db_acquire_timeout_secs: u64,
    media_root: PathBuf,
}

impl Config {
    /// Read configuration from process environment variables, falling back
    /// to defaults for everything except `DATABASE_URL`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let source = config::Environment::default().try_parsing(true);
        Self::from_builder(config::Config::builder().add_source(source))
    }

    /// Apply defaults to `builder` and resolve the nested configuration.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let settings: EnvSettings = builder
            .set_default("environment", "development")?
            .set_default("rust_log", "theatre=debug,sqlx=warn")?
            .set_default("log_format", "pretty")?
            .set_default("db_pool_size", 10)?
            .set_default("db_acquire_timeout_secs", 5)?
            .set_default("media_root", "media")?
            .build()?
            .try_deserialize()?;

        Ok(Config {
            app: AppConfig {
                environment: settings.environment,
                rust_log: settings.rust_log,
                log_format: settings.log_format,
            },
            database: DatabaseConfig {
                url: settings.database_url,
                pool_size: settings.db_pool_size,
                acquire_timeout_secs: settings.db_acquire_timeout_secs,
            },
            media: MediaConfig {
                root: settings.media_root,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }
}
