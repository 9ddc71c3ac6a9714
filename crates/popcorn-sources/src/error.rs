use thiserror::Error;

pub use reqwest::StatusCode;

/// Failures talking to the movie database.
///
/// `Display` is the message shown to the user, so every transport-level
/// problem collapses to the same generic text. Use [`SourceError::detail`]
/// for logs.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Something went wrong with fetching movies")]
    Status(StatusCode),

    #[error("Something went wrong with fetching movies")]
    Transport(#[from] reqwest::Error),

    #[error("Something went wrong with fetching movies")]
    Payload(String),

    #[error("Movie not found")]
    NotFound,
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound)
    }

    pub fn detail(&self) -> String {
        match self {
            SourceError::Status(status) => format!("HTTP {}", status),
            SourceError::Transport(e) => e.to_string(),
            SourceError::Payload(msg) => format!("unexpected payload: {}", msg),
            SourceError::NotFound => "no matches".to_string(),
        }
    }
}
