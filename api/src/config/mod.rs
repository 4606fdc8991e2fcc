use config::{Config, Environment, File, FileFormat};
use std::path::Path;

pub mod app;
pub mod defaults;
pub mod limits;
pub mod validation;

pub use app::{AppConfig, LoggingConfig, ServerConfig, StoreBackend, StoreConfig};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Default location of the user configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Load configuration from the embedded defaults, `path`, and the environment.
///
/// Later sources win: environment entries (`SECTION__KEY`) override the file,
/// which overrides the defaults. A missing file is not an error.
pub fn load_config(path: &Path) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let env_source = Environment::default().separator("__");
    load_config_with_env(path, env_source)
}

fn load_config_with_env(path: &Path, env_source: Environment) -> ConfigLoadResult {
    let file_source = File::from(path).format(FileFormat::Toml).required(false);

    let config = match Config::builder()
        .add_source(File::from_str(defaults::DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check {} and environment variables.",
                path.display()
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}
