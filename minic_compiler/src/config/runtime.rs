// RUNTIME PREFERENCES (User Experience)

use super::compile_time::emission::{DEFAULT_INDENT_WIDTH, MAX_INDENT_WIDTH};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading or validating runtime preferences
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Indent width {width} out of range (1..={MAX_INDENT_WIDTH})")]
    InvalidIndentWidth { width: usize },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::driver::CONFIGURATION_ERROR
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterPreferences {
    /// Number of spaces in one indent unit of generated Python
    pub indent_width: usize,

    /// Whether to write `pass` into a `main` body that emitted no statements
    pub pad_empty_body: bool,
}

impl Default for EmitterPreferences {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            pad_empty_body: false,
        }
    }
}

impl EmitterPreferences {
    /// Built-in defaults overridden by `MINIC_EMIT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`. Unparsable values
    /// keep the default; the result is validated.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let preferences = Self {
            indent_width: lookup(env_vars::EMIT_INDENT_WIDTH)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.indent_width),
            pad_empty_body: lookup(env_vars::EMIT_PAD_EMPTY_BODY)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.pad_empty_body),
        };
        preferences.validate()?;
        Ok(preferences)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::InvalidIndentWidth {
                width: self.indent_width,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output of pipeline events
    pub enable_console_logging: bool,

    /// Minimum level of pipeline events that reach the console
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverPreferences {
    /// Whether the driver writes the compiler trace next to the output
    pub write_trace_file: bool,

    /// Whether diagnostics are printed as JSON instead of text
    pub json_diagnostics: bool,
}

impl Default for DriverPreferences {
    fn default() -> Self {
        Self {
            write_trace_file: env::var(env_vars::DRIVER_WRITE_TRACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            json_diagnostics: env::var(env_vars::DRIVER_JSON_DIAGNOSTICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub emitter: EmitterPreferences,
    pub logging: LoggingPreferences,
    pub driver: DriverPreferences,
}

impl RuntimeConfig {
    /// Driver preferences with emitter overrides from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            emitter: EmitterPreferences::from_env()?,
            ..Self::default()
        })
    }

    /// Parse preferences from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.emitter.validate()?;
        Ok(config)
    }

    /// Load preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Emitter
    pub const EMIT_INDENT_WIDTH: &str = "MINIC_EMIT_INDENT_WIDTH";
    pub const EMIT_PAD_EMPTY_BODY: &str = "MINIC_EMIT_PAD_EMPTY_BODY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "MINIC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "MINIC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "MINIC_LOGGING_MIN_LEVEL";

    // Driver
    pub const DRIVER_WRITE_TRACE: &str = "MINIC_WRITE_TRACE";
    pub const DRIVER_JSON_DIAGNOSTICS: &str = "MINIC_JSON_DIAGNOSTICS";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_toml_overrides_emitter_section() {
        let config = RuntimeConfig::from_toml_str(
            "[emitter]\nindent_width = 2\npad_empty_body = true\n",
        )
        .unwrap();
        assert_eq!(config.emitter.indent_width, 2);
        assert!(config.emitter.pad_empty_body);
    }

    #[test]
    fn test_toml_rejects_zero_indent() {
        let result = RuntimeConfig::from_toml_str("[emitter]\nindent_width = 0\n");
        assert_matches!(result, Err(ConfigError::InvalidIndentWidth { width: 0 }));
    }

    #[test]
    fn test_toml_syntax_error() {
        let result = RuntimeConfig::from_toml_str("[emitter\nindent_width = 2");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_emitter_default_ignores_environment() {
        assert_eq!(EmitterPreferences::default().indent_width, DEFAULT_INDENT_WIDTH);
        assert!(!EmitterPreferences::default().pad_empty_body);
    }

    #[test]
    fn test_emitter_lookup_overrides() {
        let preferences = EmitterPreferences::from_lookup(|name| match name {
            env_vars::EMIT_INDENT_WIDTH => Some("2".to_string()),
            env_vars::EMIT_PAD_EMPTY_BODY => Some("true".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(preferences.indent_width, 2);
        assert!(preferences.pad_empty_body);

        let unparsable =
            EmitterPreferences::from_lookup(|_| Some("wide".to_string())).unwrap();
        assert_eq!(unparsable, EmitterPreferences::default());
    }

    #[test]
    fn test_emitter_lookup_rejects_zero_indent() {
        let result = EmitterPreferences::from_lookup(|name| {
            (name == env_vars::EMIT_INDENT_WIDTH).then(|| "0".to_string())
        });
        assert_matches!(result, Err(ConfigError::InvalidIndentWidth { width: 0 }));

        let result = EmitterPreferences::from_lookup(|name| {
            (name == env_vars::EMIT_INDENT_WIDTH).then(|| (MAX_INDENT_WIDTH + 1).to_string())
        });
        assert_matches!(result, Err(ConfigError::InvalidIndentWidth { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load(Path::new("/definitely/not/here.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
