use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_PLUGIN_ID: &str = "clothopus";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub octoprint: OctoPrintConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OctoPrintConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub simulate: bool,
}

fn default_plugin_id() -> String {
    DEFAULT_PLUGIN_ID.to_string()
}

fn default_timeout_seconds() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            octoprint: OctoPrintConfig {
                base_url: "http://octopi.local".to_string(),
                api_key: String::new(),
                plugin_id: default_plugin_id(),
                timeout_seconds: default_timeout_seconds(),
            },
            wizard: WizardConfig::default(),
        }
    }
}

impl Config {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "clothopus", "scale-wizard")
    }

    pub fn default_path() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config/default.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {e:#}");
            Self::default()
        })
    }

    /// `OCTOPRINT_URL` and `OCTOPRINT_API_KEY` take precedence over the file.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("OCTOPRINT_URL").ok(),
            std::env::var("OCTOPRINT_API_KEY").ok(),
        );
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.octoprint.base_url = url;
        }
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.octoprint.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.octoprint.base_url.trim())
            .with_context(|| format!("invalid OctoPrint URL {:?}", self.octoprint.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("OctoPrint URL must use http or https, got {}", url.scheme());
        }
        if self.octoprint.plugin_id.trim().is_empty() {
            anyhow::bail!("plugin_id must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.octoprint.timeout_seconds.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [octoprint]
            base_url = "http://printer.lan"
            "#,
        )
        .expect("parse");
        assert_eq!(config.octoprint.plugin_id, DEFAULT_PLUGIN_ID);
        assert_eq!(config.octoprint.timeout_seconds, 20);
        assert!(config.octoprint.api_key.is_empty());
        assert!(!config.wizard.simulate);
    }

    #[test]
    fn full_file_round_trips_through_toml() {
        let mut config = Config::default();
        config.octoprint.api_key = "secret".to_string();
        config.wizard.simulate = true;
        let text = toml::to_string(&config).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.octoprint.api_key, "secret");
        assert!(parsed.wizard.simulate);
    }

    #[test]
    fn overrides_replace_non_empty_values_only() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://other:5000".to_string()), Some(String::new()));
        assert_eq!(config.octoprint.base_url, "http://other:5000");
        assert!(config.octoprint.api_key.is_empty());
    }

    #[test]
    fn validate_rejects_bad_urls() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.octoprint.base_url = "octopi.local".to_string();
        assert!(config.validate().is_err());
        config.octoprint.base_url = "ftp://octopi.local".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_yields_default() {
        let config = Config::load_or_default(Path::new("/nonexistent/scale-wizard.toml"));
        assert_eq!(config.octoprint.base_url, Config::default().octoprint.base_url);
    }
}
