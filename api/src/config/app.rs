use super::{limits::*, validation::ConfigValidationError};
use serde::Deserialize;
use server::queue_manager::QueueSettings;
use server::store::RedisStoreConfig;

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    store: StoreConfig,
    #[serde(default)]
    queue: QueueSettings,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
    cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    backend: Option<String>,
    redis_url: Option<String>,
    key_prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: None,
        }
    }
}

/// Where queue state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Some(StoreBackend::Memory),
            "redis" => Some(StoreBackend::Redis),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if self.server.port() == 0 {
            errors.push(ConfigValidationError::Port);
        }

        let minutes = self.queue.minutes_per_position;
        if !(MIN_MINUTES_PER_POSITION..=MAX_MINUTES_PER_POSITION).contains(&minutes) {
            errors.push(ConfigValidationError::MinutesPerPosition {
                configured: minutes,
                min_limit: MIN_MINUTES_PER_POSITION,
                max_limit: MAX_MINUTES_PER_POSITION,
            });
        }

        match self.store.backend() {
            Some(StoreBackend::Redis) if self.store.redis_url().trim().is_empty() => {
                errors.push(ConfigValidationError::MissingRedisUrl);
            }
            Some(_) => {}
            None => errors.push(ConfigValidationError::UnknownBackend {
                configured: self.store.backend_name().to_string(),
            }),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    pub fn queue(&self) -> &QueueSettings {
        &self.queue
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

impl ServerConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8000)
    }

    pub fn cors_permissive(&self) -> bool {
        self.cors_permissive.unwrap_or(true)
    }

    /// `host:port` suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}

impl StoreConfig {
    pub fn backend_name(&self) -> &str {
        self.backend.as_deref().unwrap_or("memory")
    }

    /// `None` when the configured name is not a known backend
    pub fn backend(&self) -> Option<StoreBackend> {
        StoreBackend::parse(self.backend_name())
    }

    pub fn redis_url(&self) -> &str {
        self.redis_url
            .as_deref()
            .unwrap_or("redis://127.0.0.1:6379/0")
    }

    pub fn key_prefix(&self) -> &str {
        self.key_prefix.as_deref().unwrap_or("")
    }

    pub fn redis(&self) -> RedisStoreConfig {
        RedisStoreConfig {
            url: self.redis_url().to_string(),
            key_prefix: self.key_prefix().to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server().bind_address(), "127.0.0.1:8000");
        assert!(config.server().cors_permissive());
        assert_eq!(config.store().backend(), Some(StoreBackend::Memory));
        assert_eq!(config.queue().minutes_per_position, 2);
        assert_eq!(config.logging().level(), "info");
        assert_eq!(config.logging().file(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redis_settings() {
        let config = config_from(
            r#"
            [store]
            backend = "Redis"
            redis_url = "redis://cache:6379/2"
            key_prefix = "shop1:"
            "#,
        );

        assert_eq!(config.store().backend(), Some(StoreBackend::Redis));
        let redis = config.store().redis();
        assert_eq!(redis.url, "redis://cache:6379/2");
        assert_eq!(redis.key_prefix, "shop1:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_error() {
        let config = config_from(
            r#"
            [server]
            port = 0

            [store]
            backend = "sqlite"

            [queue]
            minutes_per_position = 0
            "#,
        );

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConfigValidationError::Port));
        assert!(matches!(
            errors[1],
            ConfigValidationError::MinutesPerPosition { configured: 0, .. }
        ));
        assert!(matches!(
            &errors[2],
            ConfigValidationError::UnknownBackend { configured } if configured == "sqlite"
        ));
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let config = config_from(
            r#"
            [store]
            backend = "redis"
            redis_url = ""
            "#,
        );

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigValidationError::MissingRedisUrl));
        assert!(errors[0].user_message().contains("STORE__REDIS_URL"));
    }

    #[test]
    fn test_minutes_per_position_upper_limit() {
        let config = config_from("[queue]\nminutes_per_position = 241\n");
        let errors = config.validate().unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::MinutesPerPosition {
                configured: 241,
                max_limit: 240,
                ..
            }
        ));
    }
}
