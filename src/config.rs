// Configuration for the client
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/mailsort/config.toml)
// 3. Built-in defaults (lowest priority)
//
// The --endpoint CLI flag, when given, overrides all three.

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the classification service
    pub endpoint: String,

    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
}

/// Config file structure - every key optional so a partial file works
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    endpoint: Option<String>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/mailsort/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mailsort").join("config.toml"))
    }

    /// Create a config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# mailsort configuration
# Uncomment and modify options as needed

# Classification service base URL (default: http://127.0.0.1:5000)
# endpoint = "http://127.0.0.1:5000"

# Theme: auto, dracula, nord, gruvbox
# theme = "auto"

# Logging configuration
# [logging]
# level = "info"        # trace, debug, info, warn, error (RUST_LOG overrides)
# file_enabled = false  # Also write logs to rotating files
# file_dir = "./logs"   # Directory for log files
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Parse config file contents, falling back to defaults on bad TOML
    fn parse_file_config(contents: &str) -> FileConfig {
        toml::from_str(contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse config file: {}", e);
            FileConfig::default()
        })
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# mailsort configuration

# Classification service base URL
endpoint = "{endpoint}"

# Theme: auto, dracula, nord, gruvbox
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
"#,
            endpoint = self.endpoint,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
        )
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Endpoint: env > file > default (local dev server)
        let endpoint = std::env::var("MAILSORT_ENDPOINT")
            .ok()
            .or(file.endpoint)
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());

        // Theme: env > file > default
        let theme = std::env::var("MAILSORT_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        // Logging: file config only (RUST_LOG handled in main)
        let file_logging = file.logging.unwrap_or_default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or_else(|| "info".to_string()),
            file_enabled: file_logging.file_enabled.unwrap_or(false),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./logs")),
        };

        Self {
            endpoint,
            theme,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            theme: "auto".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file_config() {
        let file = Config::parse_file_config(r#"theme = "nord""#);
        assert_eq!(file.theme.as_deref(), Some("nord"));
        assert!(file.endpoint.is_none());
        assert!(file.logging.is_none());
    }

    #[test]
    fn test_parse_full_file_config() {
        let file = Config::parse_file_config(
            r#"
endpoint = "http://classifier.internal:8000"
theme = "gruvbox"

[logging]
level = "debug"
file_enabled = true
file_dir = "/var/log/mailsort"
"#,
        );
        assert_eq!(
            file.endpoint.as_deref(),
            Some("http://classifier.internal:8000")
        );
        let logging = file.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.file_enabled, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml_falls_back_to_defaults() {
        let file = Config::parse_file_config("theme = [broken");
        assert!(file.theme.is_none());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let file = Config::parse_file_config(&config.to_toml());
        assert_eq!(file.endpoint.as_deref(), Some(config.endpoint.as_str()));
        assert_eq!(file.theme.as_deref(), Some(config.theme.as_str()));
    }
}
