use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API credential.
    pub api_key: String,

    /// Current-weather endpoint; omitted from the file it falls back to
    /// the public OpenWeatherMap URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: default_base_url() }
    }

    /// Both settings are required; a client must never be built from a
    /// config that fails this check.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No API key configured.\n\
                 Hint: run `weathernow configure` and enter your OpenWeatherMap API key."
            ));
        }

        if self.base_url.trim().is_empty() {
            return Err(anyhow!(
                "Weather endpoint base URL is empty.\n\
                 Hint: remove the `base_url` line from {} to use the default.",
                Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string()),
            ));
        }

        Ok(())
    }

    /// Load config from disk; a missing file is a fatal startup error, not a
    /// silent default, because the API key has no usable default.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Err(anyhow!(
                "No configuration found at {}.\n\
                 Hint: run `weathernow configure` first.",
                path.display()
            ));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathernow", "weathernow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_api_key() {
        let cfg = Config::new(String::new());
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("weathernow configure"));
    }

    #[test]
    fn validate_rejects_whitespace_api_key() {
        let cfg = Config::new("   ".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let cfg = Config { api_key: "KEY".to_string(), base_url: String::new() };
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("base URL is empty"));
    }

    #[test]
    fn validate_accepts_complete_config() {
        let cfg = Config::new("KEY".to_string());
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_defaults_when_absent_from_toml() {
        let cfg: Config = toml::from_str(r#"api_key = "KEY""#).expect("minimal config must parse");

        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_survives_roundtrip() {
        let cfg = Config {
            api_key: "KEY".to_string(),
            base_url: "http://localhost:9000/weather".to_string(),
        };

        let toml = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&toml).expect("config must parse back");

        assert_eq!(parsed.api_key, "KEY");
        assert_eq!(parsed.base_url, "http://localhost:9000/weather");
    }
}
