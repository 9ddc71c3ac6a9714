pub mod traits;
pub mod omdb;
pub mod error;

pub use traits::MovieDatabase;
pub use error::SourceError;
pub use omdb::OmdbClient;
