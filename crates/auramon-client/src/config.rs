//! Settings parser for .auramon/config.toml

use auramon_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const AURAMON_DIR: &str = ".auramon";

/// Minimum refresh interval (500 ms) to avoid hammering the backend.
pub const REFRESH_INTERVAL_MIN_MS: u64 = 500;

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_refresh_interval_ms() -> u64 {
    3000
}

fn default_alerts_limit() -> usize {
    20
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// User-facing settings, loaded from `.auramon/config.toml`.
///
/// Every field has a default, so a missing or partial file always yields a
/// usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the Aura API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// How often the fleet refresh cycle runs.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Maximum number of alerts requested per cycle.
    #[serde(default = "default_alerts_limit")]
    pub alerts_limit: usize,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            refresh_interval_ms: default_refresh_interval_ms(),
            alerts_limit: default_alerts_limit(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Settings {
    /// Refresh interval clamped to the allowed minimum.
    pub fn effective_refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms.max(REFRESH_INTERVAL_MIN_MS)
    }
}

/// Load settings from `<dir>/.auramon/config.toml`.
///
/// Missing or unparseable files fall back to defaults with a log entry; a
/// broken config file must never prevent startup.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(AURAMON_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create `.auramon/` with a commented default config if missing.
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let auramon_dir = dir.join(AURAMON_DIR);

    if !auramon_dir.exists() {
        std::fs::create_dir_all(&auramon_dir)
            .map_err(|e| Error::config(format!("Failed to create .auramon dir: {}", e)))?;
    }

    let config_path = auramon_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Aura Monitor Configuration

# Base URL of the Aura API
api_base_url = "http://localhost:5000/api"

# Fleet refresh interval in milliseconds (minimum 500)
refresh_interval_ms = 3000

# Maximum alerts fetched per refresh cycle
alerts_limit = 20

# Per-request HTTP timeout in milliseconds
request_timeout_ms = 10000
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5000/api");
        assert_eq!(settings.refresh_interval_ms, 3000);
        assert_eq!(settings.alerts_limit, 20);
        assert_eq!(settings.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let auramon_dir = dir.path().join(AURAMON_DIR);
        std::fs::create_dir_all(&auramon_dir).unwrap();
        std::fs::write(
            auramon_dir.join(CONFIG_FILENAME),
            "refresh_interval_ms = 1000\n",
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.refresh_interval_ms, 1000);
        assert_eq!(settings.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_load_settings_invalid_toml_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let auramon_dir = dir.path().join(AURAMON_DIR);
        std::fs::create_dir_all(&auramon_dir).unwrap();
        std::fs::write(auramon_dir.join(CONFIG_FILENAME), "not [valid toml").unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_effective_refresh_interval_clamps() {
        let settings = Settings {
            refresh_interval_ms: 10,
            ..Settings::default()
        };
        assert_eq!(settings.effective_refresh_interval_ms(), 500);

        let settings = Settings {
            refresh_interval_ms: 5000,
            ..Settings::default()
        };
        assert_eq!(settings.effective_refresh_interval_ms(), 5000);
    }

    #[test]
    fn test_init_config_dir_creates_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());

        // Idempotent: second call must not overwrite.
        init_config_dir(dir.path()).unwrap();
    }
}
