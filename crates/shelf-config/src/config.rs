use serde::{Deserialize, Serialize};
use shelf_models::MediaType;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend REST API settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Collection listed when no --type is given
    #[serde(default = "default_media_type")]
    pub default_type: MediaType,
    /// Include discovered items the user has not tracked
    #[serde(default = "default_true")]
    pub show_untracked: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("shelf/{}", env!("CARGO_PKG_VERSION"))
}

fn default_media_type() -> MediaType {
    MediaType::Movie
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_type: default_media_type(),
            show_untracked: default_true(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config, writing the defaults first if the file does not exist yet
    pub fn load_or_create(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load_from_file(path);
        }
        let config = Config::default();
        config.save_to_file(path)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("api.base_url is required and cannot be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "api.base_url must start with http:// or https:// (got {})",
                base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("api.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            api: ApiConfig {
                base_url: "https://shelf.example/api".to_string(),
                timeout_secs: 30,
                ..ApiConfig::default()
            },
            display: DisplayConfig {
                default_type: MediaType::Books,
                show_untracked: false,
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://shelf.example/api");
        assert_eq!(loaded.api.timeout_secs, 30);
        assert_eq!(loaded.display.default_type, MediaType::Books);
        assert!(!loaded.display.show_untracked);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://shelf.example\"\n").unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.display.default_type, MediaType::Movie);
        assert!(config.display.show_untracked);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api.base_url = "shelf.example".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "   ".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://shelf.example/api/".to_string();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 5;
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base(), "https://shelf.example/api");
    }
}
