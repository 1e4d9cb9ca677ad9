use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::UploadQueueConfig;
use crate::domain::UserId;
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub upload: UploadSettings,
    pub store: StoreSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub progress_tick_ms: u64,
    pub chunk_size_bytes: usize,
    /// 0 keeps completed uploads listed until cleared.
    pub completed_grace_ms: u64,
    pub max_file_size_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            progress_tick_ms: 100,
            chunk_size_bytes: 16 * 1024,
            completed_grace_ms: 2000,
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }
}

impl UploadSettings {
    pub fn queue_config(&self) -> UploadQueueConfig {
        UploadQueueConfig {
            progress_tick: Duration::from_millis(self.progress_tick_ms),
            chunk_size: self.chunk_size_bytes.max(1),
            completed_grace: (self.completed_grace_ms > 0)
                .then(|| Duration::from_millis(self.completed_grace_ms)),
            max_file_size: self.max_file_size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub provider: StoreProvider,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub user_id: Option<String>,
}

impl AuthSettings {
    pub fn user(&self) -> Option<UserId> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(UserId::new)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub enable_json: bool,
}

impl Settings {
    /// `.env`, then `appsettings.{environment}` if present, then `APP_*` variables
    /// (`APP_UPLOAD__CHUNK_SIZE_BYTES` sets `upload.chunk_size_bytes`).
    pub fn load() -> Result<(Environment, Self), ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env().map_err(ConfigError::Message)?;
        let settings = Self::load_for(environment)?;
        Ok((environment, settings))
    }

    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig::new(environment.as_str())
            .with_json(self.logging.enable_json)
            .with_filter(self.logging.level.clone())
    }
}
