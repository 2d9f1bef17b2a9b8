/// Server configuration
use crate::error::{Result, ServerError};
use chorus_cache::{AggregateCache, MemoryCache, NoopCache};
use chorus_core::Cache;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_uploads")]
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL used to build links to uploaded files
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_uploads_path")]
    pub uploads_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// When off, every aggregate read goes to the store
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Build the aggregate cache over the configured backend
    pub fn build(&self) -> AggregateCache {
        let backend: Arc<dyn Cache> = if self.enabled {
            Arc::new(MemoryCache::new(self.capacity))
        } else {
            Arc::new(NoopCache)
        };
        AggregateCache::new(backend, self.ttl())
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (falling back to `config.toml`) and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (CHORUS_AUTH__JWT_SECRET, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("CHORUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set CHORUS_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(ServerError::Config(
                "Cache capacity must be greater than zero".to_string(),
            ));
        }

        if self.uploads.max_image_bytes == 0 {
            return Err(ServerError::Config(
                "Maximum image size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: default_public_url(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_public_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        uploads_path: default_uploads_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/chorus.db".to_string()
}

fn default_uploads_path() -> PathBuf {
    PathBuf::from("./data/uploads")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    1
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        enabled: default_cache_enabled(),
        capacity: default_cache_capacity(),
        ttl_seconds: default_cache_ttl_seconds(),
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    10_000
}

fn default_cache_ttl_seconds() -> u64 {
    1800
}

fn default_uploads() -> UploadSettings {
    UploadSettings {
        max_image_bytes: default_max_image_bytes(),
    }
}

fn default_max_image_bytes() -> usize {
    512_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cache: default_cache(),
            uploads: default_uploads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.cache.ttl(), Duration::from_secs(1800));
        assert_eq!(config.uploads.max_image_bytes, 512_000);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_validate_requires_jwt_secret() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity_cache() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config.cache.capacity = 0;
        assert!(config.validate().is_err());

        config.cache.enabled = false;
        assert!(config.validate().is_ok());
    }
}
