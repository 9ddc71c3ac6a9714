use serde::{Deserialize, Serialize};

/// Full record for a single title, fetched by id.
///
/// Everything is kept as the database's text; numeric interpretation
/// (runtime minutes, rating) happens when a watched entry is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

impl MovieDetails {
    /// Runtime in minutes, parsed from text such as `"148 min"`
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime.split_whitespace().next()?.parse().ok()
    }

    /// IMDb rating as a number; `None` for `"N/A"` or garbage
    pub fn imdb_rating_value(&self) -> Option<f64> {
        self.imdb_rating.trim().parse::<f64>().ok().filter(|r| r.is_finite())
    }
}
