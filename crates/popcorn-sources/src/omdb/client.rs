use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieDatabase;
use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetails, MovieSummary};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// OMDb-backed [`MovieDatabase`]. Base URL and key come from configuration.
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    config: OmdbConfig,
}

impl OmdbClient {
    pub fn new(config: OmdbConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(
            operation = "omdb_client_init",
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Created OMDb client"
        );

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &OmdbConfig {
        &self.config
    }
}

#[async_trait]
impl MovieDatabase for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, SourceError> {
        debug!(operation = "omdb_search", query, "Searching OMDb");
        api::search(&self.client, &self.config, query).await
    }

    async fn get_details(&self, imdb_id: &str) -> Result<MovieDetails, SourceError> {
        debug!(operation = "omdb_details", imdb_id, "Fetching OMDb details");
        api::get_details(&self.client, &self.config, imdb_id).await
    }
}
