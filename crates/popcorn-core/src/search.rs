//! Query-driven search with cancel-on-supersede.
//!
//! Every call to [`SearchCoordinator::set_query`] aborts whatever request is
//! still running before deciding whether to start a new one. Requests run on
//! spawned tasks and report back through a channel; each completion carries
//! the generation it was started under, and only the current generation is
//! allowed to touch state.

use futures::future::{AbortHandle, Abortable, Aborted};
use popcorn_config::SearchConfig;
use popcorn_models::MovieSummary;
use popcorn_sources::{MovieDatabase, SourceError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub min_query_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { min_query_length: 3 }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            min_query_length: config.min_query_length,
        }
    }
}

/// What the result pane should show. Exactly one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    Loading,
    Error(&'a str),
    Results(&'a [MovieSummary]),
}

#[derive(Debug)]
pub enum SearchOutcome {
    Found(Vec<MovieSummary>),
    Failed(SourceError),
    Cancelled,
}

/// A finished request, as reported by its task.
#[derive(Debug)]
pub struct SearchCompletion {
    pub generation: u64,
    pub query: String,
    pub outcome: SearchOutcome,
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    movies: Vec<MovieSummary>,
    is_loading: bool,
    error: Option<String>,
    selected_id: Option<String>,
}

struct InFlight {
    generation: u64,
    handle: AbortHandle,
}

pub struct SearchCoordinator {
    database: Arc<dyn MovieDatabase>,
    options: SearchOptions,
    state: SearchState,
    generation: u64,
    in_flight: Option<InFlight>,
    completions_tx: mpsc::UnboundedSender<SearchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SearchCompletion>,
}

impl SearchCoordinator {
    pub fn new(database: Arc<dyn MovieDatabase>, options: SearchOptions) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            database,
            options,
            state: SearchState::default(),
            generation: 0,
            in_flight: None,
            completions_tx,
            completions_rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.state.movies
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected_id.as_deref()
    }

    /// True while a request for the current query is outstanding
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.state.is_loading {
            SearchView::Loading
        } else if let Some(error) = self.state.error.as_deref() {
            SearchView::Error(error)
        } else {
            SearchView::Results(&self.state.movies)
        }
    }

    /// Replace the query. Returns `true` if a request was started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        self.cancel();
        self.state.query = query.clone();

        if query.chars().count() < self.options.min_query_length {
            self.state.movies.clear();
            self.state.error = None;
            return false;
        }

        self.close_movie();
        self.state.is_loading = true;
        self.state.error = None;
        self.state.movies.clear();

        self.generation += 1;
        let generation = self.generation;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(InFlight { generation, handle });

        let database = Arc::clone(&self.database);
        let tx = self.completions_tx.clone();

        debug!(operation = "search_start", generation, query = %query, "Starting search");

        tokio::spawn(async move {
            let fetch = async { database.search(&query).await };
            let outcome = match Abortable::new(fetch, registration).await {
                Ok(Ok(movies)) => SearchOutcome::Found(movies),
                Ok(Err(e)) => SearchOutcome::Failed(e),
                Err(Aborted) => SearchOutcome::Cancelled,
            };
            // Receiver is gone once the coordinator is dropped
            let _ = tx.send(SearchCompletion {
                generation,
                query,
                outcome,
            });
        });

        true
    }

    /// Abort the in-flight request, if any. Its completion will be ignored.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(
                operation = "search_cancel",
                generation = in_flight.generation,
                "Cancelling superseded search"
            );
            in_flight.handle.abort();
            self.state.is_loading = false;
        }
        // Anything still queued from an older request is now stale
        self.generation += 1;
    }

    /// Fold a finished request into the state. Returns `false` for stale
    /// completions, which leave the state untouched.
    pub fn apply(&mut self, completion: SearchCompletion) -> bool {
        let current = self
            .in_flight
            .as_ref()
            .map_or(false, |f| f.generation == completion.generation);

        if !current {
            debug!(
                operation = "search_discard",
                generation = completion.generation,
                query = %completion.query,
                cancelled = matches!(completion.outcome, SearchOutcome::Cancelled),
                "Discarding stale search completion"
            );
            return false;
        }

        self.in_flight = None;
        self.state.is_loading = false;

        match completion.outcome {
            SearchOutcome::Found(movies) => {
                info!(
                    operation = "search_complete",
                    query = %completion.query,
                    results = movies.len(),
                    "Search completed"
                );
                self.state.movies = movies;
            }
            SearchOutcome::Failed(e) => {
                warn!(
                    operation = "search_failed",
                    query = %completion.query,
                    error = %e.detail(),
                    "Search failed"
                );
                self.state.error = Some(e.to_string());
            }
            SearchOutcome::Cancelled => {
                debug!(operation = "search_cancelled", query = %completion.query, "Search cancelled");
            }
        }

        true
    }

    /// Wait for the next finished request. Never resolves while idle, so it
    /// is safe to use as a `tokio::select!` branch.
    pub async fn recv_completion(&mut self) -> Option<SearchCompletion> {
        self.completions_rx.recv().await
    }

    /// Drive completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.in_flight.is_some() {
            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    /// Toggle: selecting the already selected id deselects it.
    pub fn select_movie(&mut self, imdb_id: &str) {
        if self.state.selected_id.as_deref() == Some(imdb_id) {
            self.state.selected_id = None;
        } else {
            self.state.selected_id = Some(imdb_id.to_string());
        }
    }

    pub fn close_movie(&mut self) {
        self.state.selected_id = None;
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests;
