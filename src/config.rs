use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemoriaConfig {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub gemini: GeminiConfig,
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Key the whole journal blob is stored under.
    pub key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationConfig {
    /// `ip`, `fixed`, or `none`.
    pub provider: String,
    pub lookup_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_memoria_dir()
            .join("memoria.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            key: "memoria_app_data".into(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            text_model: "gemini-2.5-flash".into(),
            image_model: "imagen-4.0-generate-001".into(),
            timeout_secs: 60,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: "ip".into(),
            lookup_url: "https://ipapi.co/json/".into(),
            latitude: None,
            longitude: None,
        }
    }
}

/// Returns `~/.memoria/`
pub fn default_memoria_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memoria")
}

/// Returns the default config file path: `~/.memoria/config.toml`
pub fn default_config_path() -> PathBuf {
    default_memoria_dir().join("config.toml")
}

impl MemoriaConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemoriaConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (MEMORIA_DB, MEMORIA_LOG_LEVEL,
    /// GEMINI_API_KEY, API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MEMORIA_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("MEMORIA_LOG_LEVEL") {
            self.app.log_level = val;
        }
        if let Ok(val) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            self.gemini.api_key = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MemoriaConfig::default();
        assert_eq!(config.app.log_level, "warn");
        assert_eq!(config.storage.key, "memoria_app_data");
        assert_eq!(config.gemini.text_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.image_model, "imagen-4.0-generate-001");
        assert_eq!(config.location.provider, "ip");
        assert!(config.storage.db_path.ends_with("memoria.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[app]
log_level = "debug"

[storage]
db_path = "/tmp/journal.db"

[location]
provider = "fixed"
latitude = -23.55
longitude = -46.63
"#;
        let config: MemoriaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.log_level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/journal.db");
        assert_eq!(config.location.provider, "fixed");
        assert_eq!(config.location.latitude, Some(-23.55));
        // defaults still apply for unset fields
        assert_eq!(config.storage.key, "memoria_app_data");
        assert_eq!(config.gemini.timeout_secs, 60);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = MemoriaConfig::default();
        std::env::set_var("MEMORIA_DB", "/tmp/override.db");
        std::env::set_var("MEMORIA_LOG_LEVEL", "trace");
        std::env::set_var("GEMINI_API_KEY", "test-key");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.app.log_level, "trace");
        assert_eq!(config.gemini.api_key, "test-key");

        // Clean up
        std::env::remove_var("MEMORIA_DB");
        std::env::remove_var("MEMORIA_LOG_LEVEL");
        std::env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/db.sqlite"), PathBuf::from("/var/db.sqlite"));
    }
}
