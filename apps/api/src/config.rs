//! Server configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `swift-api.toml` in the working directory (optional)
//! 3. `SWIFT_*` environment variables (a `.env` file is loaded first)
//!
//! ```text
//! SWIFT_HOST                  0.0.0.0
//! SWIFT_PORT                  8080
//! SWIFT_DATABASE_PATH         ./swift.db
//! SWIFT_IMPORT_CSV            (unset: no startup import)
//! SWIFT_REQUEST_TIMEOUT_SECS  10
//! SWIFT_DB_MAX_CONNECTIONS    5
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// CSV export to load at startup, if any
    #[serde(default)]
    pub import_csv: Option<PathBuf>,

    /// Deadline for each registry operation
    pub request_timeout_secs: u64,

    /// Pool size
    pub db_max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("./swift.db"),
            import_csv: None,
            request_timeout_secs: 10,
            db_max_connections: 5,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = Self::defaults()?
            .add_source(File::with_name("swift-api").required(false))
            .add_source(Environment::with_prefix("SWIFT").try_parsing(true));

        Self::from_builder(builder)
    }

    /// Builds, deserializes and validates.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: ApiConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let d = ApiConfig::default();
        Ok(Config::builder()
            .set_default("host", d.host)?
            .set_default("port", i64::from(d.port))?
            .set_default("database_path", d.database_path.display().to_string())?
            .set_default("request_timeout_secs", d.request_timeout_secs as i64)?
            .set_default("db_max_connections", i64::from(d.db_max_connections))?)
    }

    /// Rejects values the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("db_max_connections".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("request_timeout_secs".to_string()));
        }
        Ok(())
    }

    /// Socket address string, `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
