use std::path::PathBuf;
use std::time::Duration;

use config::{
    Config, ConfigBuilder, ConfigError, Environment, File as ConfigFile, FileFormat,
    builder::DefaultState,
};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::api::DEFAULT_ENDPOINT;
use crate::notify::FlagDurations;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Deserialize)]
pub struct Notify {
    pub copy_confirmation_ms: u64,
    pub celebration_ms: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive for an `EnvFilter`, scoped to our own crates.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "moodji=trace,moodji_client=trace",
            LogLevel::Debug => "moodji=debug,moodji_client=debug",
            LogLevel::Info => "moodji=info,moodji_client=info",
            LogLevel::Warn => "moodji=warn,moodji_client=warn",
            LogLevel::Error => "moodji=error,moodji_client=error",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logs {
    pub enabled: bool,
    pub dir: String,
    pub file: String,
    pub level: LogLevel,
    /// Days to keep rotated log files around.
    pub retention: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Base URL of the classifier; `/predict` is appended.
    pub api_endpoint: String,
    pub haptics: bool,
    pub notify: Notify,
    pub logs: Logs,
}

impl Settings {
    /// Load settings: built-in defaults, then `config.toml` from the config
    /// dir (if it exists), then `MOODJI_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_file = config_dir().join(CONFIG_FILE);
        tracing::debug!(path = %config_file.display(), "loading settings");

        Self::builder()?
            .add_source(ConfigFile::from(config_file).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("moodji")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// A builder with every default filled in. Tests and callers with their
    /// own sources layer on top of this.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let log_dir = data_dir().join("logs");

        Config::builder()
            .set_default("api_endpoint", DEFAULT_ENDPOINT)?
            .set_default("haptics", true)?
            .set_default("notify.copy_confirmation_ms", 2000)?
            .set_default("notify.celebration_ms", 3000)?
            .set_default("logs.enabled", true)?
            .set_default("logs.dir", log_dir.to_string_lossy().to_string())?
            .set_default("logs.file", "tui.log")?
            .set_default("logs.level", "info")?
            .set_default("logs.retention", 7)
    }

    pub fn flag_durations(&self) -> FlagDurations {
        FlagDurations {
            copy_confirmation: Duration::from_millis(self.notify.copy_confirmation_ms),
            celebration: Duration::from_millis(self.notify.celebration_ms),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "moodji")
}

/// `MOODJI_CONFIG_DIR`, or the platform config dir.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOODJI_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".moodji"))
}

/// `MOODJI_DATA_DIR`, or the platform data dir.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOODJI_DATA_DIR") {
        return PathBuf::from(dir);
    }

    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".moodji"))
}
