use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie the user has marked as watched, with their own rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Minutes; absent when the database has no runtime for the title
    pub runtime: Option<u32>,
    pub imdb_rating: Option<f64>,
    /// 1-10
    pub user_rating: u8,
    pub added_at: DateTime<Utc>,
}
