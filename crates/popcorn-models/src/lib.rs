pub mod details;
pub mod movie;
pub mod watched;

pub use details::MovieDetails;
pub use movie::MovieSummary;
pub use watched::WatchedMovie;
