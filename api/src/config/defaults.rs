/// Default configuration file embedded in the binary.
///
/// Loaded as the lowest-priority source, so every key has a value even when
/// no `config.toml` exists.
pub const DEFAULT_CONFIG: &str = include_str!("../../../config.default.toml");
