use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const LOG_LEVEL_ENV: &str = "PROXY_QUERIER_LOG_LEVEL";
pub const DEBUG_PREFIX_ENV: &str = "PROXY_QUERIER_DEBUG_PREFIX";
pub const DEFAULT_DEBUG_PREFIX: &str = "promclient";

/// How much the remote API decorator records. Ordered from least to most verbose.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogVerbosity {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    /// Additionally records full result payloads.
    Trace,
}

impl LogVerbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogVerbosity::Error => "error",
            LogVerbosity::Warn => "warn",
            LogVerbosity::Info => "info",
            LogVerbosity::Debug => "debug",
            LogVerbosity::Trace => "trace",
        }
    }

    pub fn records_payloads(&self) -> bool {
        *self >= LogVerbosity::Trace
    }
}

impl Display for LogVerbosity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogVerbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogVerbosity::Error),
            "warn" | "warning" => Ok(LogVerbosity::Warn),
            "info" => Ok(LogVerbosity::Info),
            "debug" => Ok(LogVerbosity::Debug),
            "trace" => Ok(LogVerbosity::Trace),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Verbosity of the remote API decorator. Only `trace` records result payloads.
    pub log_verbosity: LogVerbosity,

    /// Message attached to every record emitted by the remote API decorator.
    pub debug_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_verbosity: LogVerbosity::default(),
            debug_prefix: DEFAULT_DEBUG_PREFIX.to_string(),
        }
    }
}

impl Settings {
    /// Builds settings from the environment, falling back to defaults for anything unset or
    /// unparseable.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Some(level) = get_setting_from_env::<LogVerbosity>(LOG_LEVEL_ENV) {
            settings.log_verbosity = level;
        }
        if let Some(prefix) = get_setting_from_env::<String>(DEBUG_PREFIX_ENV) {
            settings.debug_prefix = prefix;
        }
        settings
    }
}

static GLOBAL_SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Installs the process-wide settings. Only the first call has an effect; returns false if
/// settings were already initialized.
pub fn init_global_settings(settings: Settings) -> bool {
    GLOBAL_SETTINGS.set(settings).is_ok()
}

pub fn get_global_settings() -> &'static Settings {
    GLOBAL_SETTINGS.get_or_init(Settings::default)
}

fn get_setting_from_env<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
}
