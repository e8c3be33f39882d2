use config::{Config, File};
pub use config::ConfigError;
use serde::Deserialize;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Dashboard defaults and storage
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Server host (default 127.0.0.1)
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Server port (default 3000)
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Origin used in share links, e.g. "https://pnl.example.com"
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// Configured public URL, else the listen address
    pub fn origin(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

fn default_server_port() -> u16 {
    3000
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// PnL API used when no preference or route overrides it
    #[serde(default = "default_base_url")]
    pub default_base_url: String,
    /// JSON file holding user preferences
    #[serde(default = "default_prefs_file")]
    pub prefs_file: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_base_url: default_base_url(),
            prefs_file: default_prefs_file(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_prefs_file() -> String {
    "pnl_prefs.json".to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from a configuration file (optional)
    pub fn new(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            // Environment variables override the file
            // e.g. APP_SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::new("definitely_missing_config").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.origin(), "http://127.0.0.1:3000");
        assert_eq!(settings.dashboard.default_base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.dashboard.timeout_ms, 15_000);
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pnl_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[server]
port = 8088
public_url = "https://pnl.example.com"

[dashboard]
default_base_url = "https://api.example.com"
prefs_file = "/tmp/prefs.json"

[log]
level = "debug"
"#,
        )
        .unwrap();

        let settings = Settings::new(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.origin(), "https://pnl.example.com");
        assert_eq!(settings.dashboard.default_base_url, "https://api.example.com");
        assert_eq!(settings.dashboard.timeout_ms, 15_000);
        assert_eq!(settings.log.level, "debug");

        std::fs::remove_file(&path).ok();
    }
}
