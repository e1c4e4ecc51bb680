use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::common::error::SumanError;
use crate::common::result::SumanResult;
use crate::domain::entities::LogConfig;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// configured level is used as a fallback.
pub fn init_logging(config: &LogConfig, verbose: bool) -> SumanResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(filter_directive(config, verbose)?),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    SumanError::config_error_with_source(
                        format!("Cannot open log file {}", path.display()),
                        e,
                    )
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| SumanError::internal_error(format!("Failed to initialize logging: {}", e)))
}

/// Filter directive derived from the configuration
pub fn filter_directive(config: &LogConfig, verbose: bool) -> SumanResult<String> {
    if verbose {
        return Ok("debug".to_string());
    }

    let level = config.level.to_lowercase();
    level
        .parse::<tracing::Level>()
        .map_err(|_| SumanError::config_error(format!("Invalid log level: {}", config.level)))?;
    Ok(level)
}
