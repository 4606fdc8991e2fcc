use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info, // Default to Info for any other value
    }
}

/// Install the global logger: stdout always, plus the configured file if any.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let log_level = level_filter(config.level());

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let stdout_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout());

    // Files get plain level names, no ANSI escapes
    let file_config = config.file().and_then(|file_path| {
        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => Some(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            ),
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing without file logging.");
                None
            }
        }
    });

    let mut dispatch = fern::Dispatch::new()
        .level(log_level)
        // Connection pool chatter from the Redis client is rarely useful
        .level_for("redis", LevelFilter::Warn)
        .chain(stdout_config);
    let file_enabled = file_config.is_some();
    if let Some(file_config) = file_config {
        dispatch = dispatch.chain(file_config);
    }
    dispatch.apply()?;

    log::info!("Logger initialized with level: {}", config.level());
    if let (true, Some(file_path)) = (file_enabled, config.file()) {
        log::info!("Logging to file: {file_path}");
    }
    Ok(())
}
