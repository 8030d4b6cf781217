//! Logging utilities and structured logging support

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Once;

pub use log::{debug, error, info, trace, warn};

static INIT: Once = Once::new();

/// Logger configuration
///
/// `filter` follows the `env_logger` filter syntax (for example
/// `"gl_context=debug,info"`). When it is absent, `RUST_LOG` is consulted and
/// `default_level` is used as the last resort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit filter directives
    pub filter: Option<String>,
    /// Level used when neither `filter` nor `RUST_LOG` is set
    pub default_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed form of `default_level`, falling back to `Info` on garbage
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.default_level).unwrap_or(log::LevelFilter::Info)
    }
}

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize the logging system with an explicit configuration
///
/// Only the first call has any effect. A logger installed by someone else
/// (a test harness, the embedding application) is left alone.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.level_filter());
        }

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
