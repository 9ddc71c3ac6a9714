pub mod browse;
pub mod config;
pub mod details;
pub mod prompts;
pub mod render;
pub mod search;

use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_sources::{MovieDatabase, OmdbClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// `--config` if given, otherwise the platform default
pub fn config_path(override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| PathManager::default().config_file())
}

/// Load the config file (or defaults), apply the environment override and validate
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", path.display(), e))?;
    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration ({}): {}", path.display(), e))?;
    Ok(config)
}

pub fn create_database(config: &Config) -> Result<Arc<dyn MovieDatabase>> {
    let client = OmdbClient::new(config.omdb.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create OMDb client: {}", e.detail()))?;
    let database: Arc<dyn MovieDatabase> = Arc::new(client);
    Ok(database)
}
