//! Process bootstrap: configuration and logging.
//!
//! - [`config`] - [`AppConfig`] from defaults, environment and arguments
//! - [`logging`] - tracing subscriber writing to the data directory

pub mod config;
pub mod logging;

pub use config::{parse_launch_mode, AppConfig, ConfigError, LaunchMode, DEFAULT_MAX_WIDTH};
pub use logging::{init_logging, LOG_ENV, LOG_FILE};
