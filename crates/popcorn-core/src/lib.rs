pub mod search;
pub mod watched;

pub use search::{SearchCompletion, SearchCoordinator, SearchOptions, SearchOutcome, SearchView};
pub use watched::{average, watched_from_details, WatchedError, WatchedList, WatchedSummary};
