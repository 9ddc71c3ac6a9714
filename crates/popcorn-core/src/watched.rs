use chrono::Utc;
use popcorn_models::{MovieDetails, WatchedMovie};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub const MIN_USER_RATING: u8 = 1;
pub const MAX_USER_RATING: u8 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum WatchedError {
    #[error("'{0}' is already in your watched list")]
    AlreadyWatched(String),

    #[error("rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),
}

/// Arithmetic mean; 0 for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Build a watched entry from a details lookup and the user's rating.
pub fn watched_from_details(details: &MovieDetails, user_rating: u8) -> Result<WatchedMovie, WatchedError> {
    if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&user_rating) {
        return Err(WatchedError::InvalidRating(user_rating));
    }

    Ok(WatchedMovie {
        imdb_id: details.imdb_id.clone(),
        title: details.title.clone(),
        year: details.year.clone(),
        poster: details.poster.clone(),
        runtime: details.runtime_minutes(),
        imdb_rating: details.imdb_rating_value(),
        user_rating,
        added_at: Utc::now(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    /// Minutes
    pub avg_runtime: f64,
}

/// In-memory, insertion-ordered list of watched movies.
#[derive(Debug, Default)]
pub struct WatchedList {
    movies: Vec<WatchedMovie>,
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, movie: WatchedMovie) -> Result<(), WatchedError> {
        if self.contains(&movie.imdb_id) {
            return Err(WatchedError::AlreadyWatched(movie.title));
        }
        info!(
            operation = "watched_add",
            imdb_id = %movie.imdb_id,
            user_rating = movie.user_rating,
            "Added movie to watched list"
        );
        self.movies.push(movie);
        Ok(())
    }

    /// Remove the entry with this id. Returns whether anything was removed.
    pub fn remove(&mut self, imdb_id: &str) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.imdb_id != imdb_id);
        let removed = self.movies.len() != before;
        debug!(operation = "watched_remove", imdb_id, removed, "Removed movie from watched list");
        removed
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.movies.iter().any(|m| m.imdb_id == imdb_id)
    }

    pub fn user_rating(&self, imdb_id: &str) -> Option<u8> {
        self.movies
            .iter()
            .find(|m| m.imdb_id == imdb_id)
            .map(|m| m.user_rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchedMovie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Averages skip entries where the database had no value.
    pub fn summary(&self) -> WatchedSummary {
        let imdb: Vec<f64> = self.movies.iter().filter_map(|m| m.imdb_rating).collect();
        let user: Vec<f64> = self.movies.iter().map(|m| f64::from(m.user_rating)).collect();
        let runtime: Vec<f64> = self
            .movies
            .iter()
            .filter_map(|m| m.runtime.map(f64::from))
            .collect();

        WatchedSummary {
            count: self.movies.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime: average(&runtime),
        }
    }
}
