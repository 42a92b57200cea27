//! Runtime configuration.
//!
//! Values come from defaults, then environment variables, then launch
//! arguments.
//!
//! # Example
//!
//! ```ignore
//! use cryptoquip::startup::AppConfig;
//!
//! let config = AppConfig::from_env()?.with_args(std::env::args().skip(1))?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::DEFAULT_API_URL;
use crate::models::PuzzleRequest;

pub const ENV_API_URL: &str = "CRYPTOQUIP_API_URL";
pub const ENV_DATA_DIR: &str = "CRYPTOQUIP_DATA_DIR";
pub const ENV_MAX_WIDTH: &str = "CRYPTOQUIP_MAX_WIDTH";
pub const ENV_TIMEOUT_SECS: &str = "CRYPTOQUIP_TIMEOUT_SECS";

const DATA_DIR_NAME: &str = ".cryptoquip";
/// Default upper bound on the grid width in columns.
pub const DEFAULT_MAX_WIDTH: u16 = 80;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What the process does once the player configuration is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Play(PuzzleRequest),
    /// Show the player's statistics, then exit.
    Stats,
}

impl Default for LaunchMode {
    fn default() -> Self {
        LaunchMode::Play(PuzzleRequest::Today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown argument '{0}' (expected --random, --date YYYY-MM-DD, --stats or --version)")]
    UnknownArgument(String),

    #[error("--date requires a value in YYYY-MM-DD form")]
    MissingDate,

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the puzzle and stats backend
    pub api_url: String,
    /// Holds `player.json`, `sessions/` and the log file
    pub data_dir: PathBuf,
    /// Upper bound on the grid width in terminal columns
    pub max_width: u16,
    pub request_timeout: Duration,
    pub launch: LaunchMode,
}

/// `~/.cryptoquip`, or a relative `.cryptoquip` when there is no home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            max_width: DEFAULT_MAX_WIDTH,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            launch: LaunchMode::default(),
        }
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_launch(mut self, launch: LaunchMode) -> Self {
        self.launch = launch;
        self
    }

    /// Defaults overridden by the `CRYPTOQUIP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_url(url.trim());
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config = config.with_data_dir(dir);
        }
        if let Some(width) = lookup(ENV_MAX_WIDTH) {
            let width = parse_positive(ENV_MAX_WIDTH, &width)?;
            config = config.with_max_width(width.min(u16::MAX as u64) as u16);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = parse_positive(ENV_TIMEOUT_SECS, &secs)?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Apply launch arguments (without the program name).
    pub fn with_args<I, S>(self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let launch = parse_launch_mode(args)?;
        Ok(self.with_launch(launch))
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(super::logging::LOG_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// `--random`, `--date YYYY-MM-DD` or `--stats`; the last one given wins.
pub fn parse_launch_mode<I, S>(args: I) -> Result<LaunchMode, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut launch = LaunchMode::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--random" => launch = LaunchMode::Play(PuzzleRequest::Random),
            "--stats" => launch = LaunchMode::Stats,
            "--date" => {
                let value = args.next().ok_or(ConfigError::MissingDate)?;
                let value = value.as_ref();
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidDate(value.to_string()))?;
                launch = LaunchMode::Play(PuzzleRequest::Date(date));
            }
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
    }

    Ok(launch)
}
