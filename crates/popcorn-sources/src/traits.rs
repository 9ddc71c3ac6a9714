use async_trait::async_trait;
use popcorn_models::{MovieDetails, MovieSummary};
use crate::error::SourceError;

/// A remote catalogue that can be searched by title and queried by id.
///
/// Implementations must be cheap to share behind an `Arc`: the search
/// coordinator hands a clone to every spawned request.
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    fn source_name(&self) -> &str;

    /// Title search. A response with no matches is `SourceError::NotFound`,
    /// never an empty `Ok`.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, SourceError>;

    async fn get_details(&self, imdb_id: &str) -> Result<MovieDetails, SourceError>;
}
