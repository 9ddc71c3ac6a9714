use serde::{Deserialize, Serialize};

/// A single search hit as returned by the movie database.
///
/// Field names follow the OMDb wire format. Values are passed through as-is;
/// `year` stays textual because series report ranges like `"2008–2013"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl MovieSummary {
    pub fn new(imdb_id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: year.into(),
            poster: String::new(),
            media_type: None,
        }
    }

    /// Poster URL, or `None` when the database reports `"N/A"`
    pub fn poster_url(&self) -> Option<&str> {
        match self.poster.as_str() {
            "" | "N/A" => None,
            url => Some(url),
        }
    }
}
