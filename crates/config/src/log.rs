use crate::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: TTM_LOG_LEVEL
    /// Valid values: trace, debug, info, warn, error
    /// Default: info
    #[serde(default = "default_level")]
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: TTM_LOG_JSON
    /// Default: false
    #[serde(default = "default_json")]
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: TTM_LOG_STRIP_ANSI
    /// Default: false
    #[serde(default = "default_strip_ansi")]
    pub strip_ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

fn default_strip_ansi() -> bool {
    false
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: default_json(),
            strip_ansi: default_strip_ansi(),
        }
    }
}
