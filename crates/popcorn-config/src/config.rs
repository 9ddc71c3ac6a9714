use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";
/// Environment variable that overrides `omdb.api_key`
pub const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Connection settings for the OMDb movie database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) never hit the network
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_query_length() -> usize {
    3
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
        }
    }
}

impl OmdbConfig {
    pub fn is_api_key_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// API key with all but the last two characters masked
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 2 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 2..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 2), visible)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `POPCORN_OMDB_API_KEY` on top of the file value
    pub fn apply_env_overrides(&mut self) {
        self.override_api_key(std::env::var(API_KEY_ENV).ok());
    }

    pub fn override_api_key(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.omdb.api_key = key;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.omdb.is_api_key_configured() {
            return Err(anyhow::anyhow!(
                "OMDb API key is not configured (run `popcorn config init` or set {})",
                API_KEY_ENV
            ));
        }

        let base_url = self.omdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL, got '{}'", base_url));
        }

        if self.omdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_secs must be greater than zero"));
        }

        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn configured() -> Config {
        Config {
            omdb: OmdbConfig {
                api_key: "852bab22".to_string(),
                ..OmdbConfig::default()
            },
            search: SearchConfig::default(),
        }
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = configured();
        config.omdb.timeout_secs = 30;
        config.search.min_query_length = 4;

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.omdb.api_key, "852bab22");
        assert_eq!(loaded.omdb.base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(loaded.omdb.timeout_secs, 30);
        assert_eq!(loaded.search.min_query_length, 4);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[omdb]\napi_key = \"abc123\"\n").unwrap();
        assert_eq!(config.omdb.api_key, "abc123");
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(config.omdb.timeout_secs, 10);
        assert_eq!(config.search.min_query_length, 3);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = std::env::temp_dir().join("popcorn-config-test-missing");
        let config = Config::load_or_default(&dir.join("nope.toml")).unwrap();
        assert_eq!(config.omdb.api_key, PLACEHOLDER_API_KEY);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        assert!(!config.omdb.is_api_key_configured());

        config = configured();
        assert!(config.validate().is_ok());

        config.omdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config = configured();
        config.omdb.timeout_secs = 0;
        assert!(config.validate().is_err());

        config = configured();
        config.search.min_query_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_override_api_key() {
        let mut config = Config::default();
        config.override_api_key(Some("   ".to_string()));
        assert_eq!(config.omdb.api_key, PLACEHOLDER_API_KEY);

        config.override_api_key(None);
        assert_eq!(config.omdb.api_key, PLACEHOLDER_API_KEY);

        config.override_api_key(Some("from-env".to_string()));
        assert_eq!(config.omdb.api_key, "from-env");
    }

    #[test]
    fn test_masked_api_key() {
        let config = configured();
        assert_eq!(config.omdb.masked_api_key(), "******22");

        let short = OmdbConfig {
            api_key: "ab".to_string(),
            ..OmdbConfig::default()
        };
        assert_eq!(short.masked_api_key(), "**");
    }
}
