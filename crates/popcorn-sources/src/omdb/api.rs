use crate::error::SourceError;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetails, MovieSummary};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Option<Vec<MovieSummary>>,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

/// `GET <base_url>?apikey=<key>&s=<query>`
pub fn search_request(client: &Client, config: &OmdbConfig, query: &str) -> RequestBuilder {
    client
        .get(config.base_url.trim())
        .query(&[("apikey", config.api_key.as_str()), ("s", query)])
}

/// `GET <base_url>?apikey=<key>&i=<imdb_id>`
pub fn details_request(client: &Client, config: &OmdbConfig, imdb_id: &str) -> RequestBuilder {
    client
        .get(config.base_url.trim())
        .query(&[("apikey", config.api_key.as_str()), ("i", imdb_id)])
}

/// OMDb signals "no match" in-band with `"Response": "False"` and a 200 status
fn is_negative_response(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

pub fn parse_search_response(body: &str) -> Result<Vec<MovieSummary>, SourceError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Payload(e.to_string()))?;

    if is_negative_response(&parsed.response) {
        debug!(
            operation = "omdb_search",
            reason = parsed.error.as_deref().unwrap_or("unknown"),
            "OMDb reported no matches"
        );
        return Err(SourceError::NotFound);
    }

    let movies = parsed
        .search
        .ok_or_else(|| SourceError::Payload("missing Search array".to_string()))?;

    debug!(
        operation = "omdb_search",
        returned = movies.len(),
        total = parsed.total_results.as_deref().unwrap_or("?"),
        "Parsed OMDb search response"
    );

    Ok(movies)
}

pub fn parse_details_response(body: &str) -> Result<MovieDetails, SourceError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SourceError::Payload(e.to_string()))?;

    if json["Response"].as_str().map(is_negative_response).unwrap_or(false) {
        debug!(
            operation = "omdb_details",
            reason = json["Error"].as_str().unwrap_or("unknown"),
            "OMDb reported no title for id"
        );
        return Err(SourceError::NotFound);
    }

    serde_json::from_value(json).map_err(|e| SourceError::Payload(e.to_string()))
}

pub async fn search(client: &Client, config: &OmdbConfig, query: &str) -> Result<Vec<MovieSummary>, SourceError> {
    let response = search_request(client, config, query).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Status(response.status()));
    }

    let body = response.text().await?;
    parse_search_response(&body)
}

pub async fn get_details(client: &Client, config: &OmdbConfig, imdb_id: &str) -> Result<MovieDetails, SourceError> {
    let response = details_request(client, config, imdb_id).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Status(response.status()));
    }

    let body = response.text().await?;
    parse_details_response(&body)
}
