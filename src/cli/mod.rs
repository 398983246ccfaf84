//! Command handlers for the `replcalc` binary.

pub(crate) mod calc;
pub(crate) mod plugins;
pub(crate) mod repl;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use replcalc::config::{Config, LogFormat};

/// Load configuration from the config file and environment.
pub(crate) fn load_config() -> Result<Config> {
    Config::load()
        .with_context(|| format!("Failed to load configuration from {:?}", Config::path()))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr unless a log
/// file is configured, so they never interleave with menu output on stdout.
pub(crate) fn init_logging(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level '{}'", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.log_file, config.log_format) {
        (Some(path), LogFormat::Json) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder.json().with_writer(Mutex::new(file)).try_init()
        }
        (Some(path), LogFormat::Text) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogFormat::Json) => builder.json().with_writer(std::io::stderr).try_init(),
        (None, LogFormat::Text) => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
