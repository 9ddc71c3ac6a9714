pub mod config;
pub mod paths;

pub use config::{Config, OmdbConfig, SearchConfig, API_KEY_ENV, DEFAULT_OMDB_BASE_URL, PLACEHOLDER_API_KEY};
pub use paths::{PathManager, container_base_path};
