use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid server.port: 0")]
    Port,
    #[error("Invalid minutes_per_position: {configured} (min: {min_limit}, max: {max_limit})")]
    MinutesPerPosition {
        configured: u32,
        min_limit: u32,
        max_limit: u32,
    },
    #[error("Unknown store backend: {configured}")]
    UnknownBackend { configured: String },
    #[error("Redis backend selected but store.redis_url is empty")]
    MissingRedisUrl,
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::Port => {
                "Server port must be non-zero.\n\n\
                Please set [server] port in config.toml or SERVER__PORT."
                    .to_string()
            }
            ConfigValidationError::MinutesPerPosition {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Minutes per position out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update [queue] minutes_per_position in config.toml."
                )
            }
            ConfigValidationError::UnknownBackend { configured } => {
                format!(
                    "Unknown store backend '{configured}'.\n\n\
                    Supported backends: memory, redis"
                )
            }
            ConfigValidationError::MissingRedisUrl => {
                "The redis backend needs a connection URL.\n\n\
                Please set [store] redis_url in config.toml or STORE__REDIS_URL."
                    .to_string()
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
