use super::*;
use async_trait::async_trait;
use popcorn_models::MovieDetails;
use popcorn_sources::error::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

type SearchResult = Result<Vec<MovieSummary>, SourceError>;

/// Database whose answers are released by the test, one gate per query.
/// Queries without a gate answer `NotFound` immediately.
#[derive(Default)]
struct GatedDatabase {
    gates: Mutex<HashMap<String, oneshot::Receiver<SearchResult>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedDatabase {
    fn gate(&self, query: &str) -> oneshot::Sender<SearchResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieDatabase for GatedDatabase {
    fn source_name(&self) -> &str {
        "gated"
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, SourceError> {
        self.calls.lock().unwrap().push(query.to_string());
        let gate = self.gates.lock().unwrap().remove(query);
        match gate {
            Some(rx) => match rx.await {
                Ok(result) => result,
                Err(_) => futures::future::pending().await,
            },
            None => Err(SourceError::NotFound),
        }
    }

    async fn get_details(&self, _imdb_id: &str) -> Result<MovieDetails, SourceError> {
        Err(SourceError::NotFound)
    }
}

fn movie(imdb_id: &str, title: &str) -> MovieSummary {
    MovieSummary::new(imdb_id, title, "2005")
}

fn coordinator(database: &Arc<GatedDatabase>) -> SearchCoordinator {
    let database: Arc<dyn MovieDatabase> = database.clone();
    SearchCoordinator::new(database, SearchOptions::default())
}

/// Let spawned requests run until the database has seen `count` calls
async fn wait_for_calls(database: &GatedDatabase, count: usize) {
    for _ in 0..100 {
        if database.calls().len() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("database saw {:?}, expected {} calls", database.calls(), count);
}

#[tokio::test]
async fn test_successful_search_replaces_results() {
    let database = Arc::new(GatedDatabase::default());
    let tx = database.gate("batman");
    let mut search = coordinator(&database);

    assert!(search.set_query("batman"));
    assert!(search.is_loading());
    assert_eq!(search.view(), SearchView::Loading);

    tx.send(Ok(vec![movie("tt0372784", "Batman Begins"), movie("tt1877830", "The Batman")]))
        .unwrap();
    search.settle().await;

    assert!(!search.is_loading());
    assert!(!search.is_searching());
    assert_eq!(search.error(), None);
    assert_eq!(search.movies().len(), 2);
    match search.view() {
        SearchView::Results(movies) => assert_eq!(movies[0].title, "Batman Begins"),
        other => panic!("expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_short_query_clears_results_and_error() {
    let database = Arc::new(GatedDatabase::default());
    let tx = database.gate("batman");
    let mut search = coordinator(&database);

    search.set_query("batman");
    tx.send(Ok(vec![movie("tt0372784", "Batman Begins")])).unwrap();
    search.settle().await;
    assert_eq!(search.movies().len(), 1);

    assert!(!search.set_query("ba"));
    assert!(search.movies().is_empty());
    assert_eq!(search.error(), None);
    assert!(!search.is_loading());

    // No gate for "robin", so it fails with NotFound
    search.set_query("robin");
    search.settle().await;
    assert_eq!(search.error(), Some("Movie not found"));

    assert!(!search.set_query(""));
    assert!(search.movies().is_empty());
    assert_eq!(search.error(), None);
    assert_eq!(search.query(), "");
    assert_eq!(database.calls(), vec!["batman".to_string(), "robin".to_string()]);
}

#[tokio::test]
async fn test_short_query_counts_characters_not_bytes() {
    let database = Arc::new(GatedDatabase::default());
    let mut search = coordinator(&database);

    // Two characters, four bytes
    assert!(!search.set_query("éé"));
    assert!(search.set_query("été"));
}

#[tokio::test]
async fn test_short_query_cancels_in_flight_search() {
    let database = Arc::new(GatedDatabase::default());
    let mut tx = database.gate("batman");
    let mut search = coordinator(&database);

    search.set_query("batman");
    wait_for_calls(&database, 1).await;

    search.set_query("ba");
    assert!(!search.is_loading());
    assert!(!search.is_searching());

    tokio::time::timeout(Duration::from_secs(1), tx.closed())
        .await
        .expect("aborted request should drop its gate");

    search.settle().await;
    assert!(search.movies().is_empty());
    assert_eq!(search.error(), None);
}

#[tokio::test]
async fn test_superseded_search_never_updates_state() {
    let database = Arc::new(GatedDatabase::default());
    let mut batman_tx = database.gate("batman");
    let superman_tx = database.gate("superman");
    let mut search = coordinator(&database);

    search.set_query("batman");
    wait_for_calls(&database, 1).await;
    search.set_query("superman");

    tokio::time::timeout(Duration::from_secs(1), batman_tx.closed())
        .await
        .expect("batman request should be aborted");

    superman_tx.send(Ok(vec![movie("tt0078346", "Superman")])).unwrap();
    search.settle().await;

    assert_eq!(search.movies().len(), 1);
    assert_eq!(search.movies()[0].title, "Superman");
    assert_eq!(search.error(), None);

    // The cancelled request may still be queued; it must not apply
    if let Ok(Some(stale)) = tokio::time::timeout(Duration::from_millis(50), search.recv_completion()).await {
        assert_eq!(stale.query, "batman");
        assert!(matches!(stale.outcome, SearchOutcome::Cancelled));
        assert!(!search.apply(stale));
    }
    assert_eq!(search.movies()[0].title, "Superman");
}

#[tokio::test]
async fn test_stale_completion_is_ignored() {
    let database = Arc::new(GatedDatabase::default());
    let _gate = database.gate("superman");
    let mut search = coordinator(&database);

    search.set_query("superman");

    let stale = SearchCompletion {
        generation: 0,
        query: "batman".to_string(),
        outcome: SearchOutcome::Found(vec![movie("tt0372784", "Batman Begins")]),
    };
    assert!(!search.apply(stale));
    assert!(search.is_loading());
    assert!(search.movies().is_empty());
}

#[tokio::test]
async fn test_not_found_sets_error_and_keeps_results_empty() {
    let database = Arc::new(GatedDatabase::default());
    let tx = database.gate("qwertyuiop");
    let mut search = coordinator(&database);

    search.set_query("qwertyuiop");
    tx.send(Err(SourceError::NotFound)).unwrap();
    search.settle().await;

    assert_eq!(search.error(), Some("Movie not found"));
    assert!(search.movies().is_empty());
    assert!(!search.is_loading());
    assert_eq!(search.view(), SearchView::Error("Movie not found"));
}

#[tokio::test]
async fn test_http_failure_sets_generic_error() {
    let database = Arc::new(GatedDatabase::default());
    let tx = database.gate("batman");
    let mut search = coordinator(&database);

    search.set_query("batman");
    tx.send(Err(SourceError::Status(StatusCode::INTERNAL_SERVER_ERROR))).unwrap();
    search.settle().await;

    assert_eq!(search.error(), Some("Something went wrong with fetching movies"));
    assert!(!search.is_loading());
}

#[tokio::test]
async fn test_new_search_clears_previous_error() {
    let database = Arc::new(GatedDatabase::default());
    let mut search = coordinator(&database);

    search.set_query("nothing here");
    search.settle().await;
    assert_eq!(search.error(), Some("Movie not found"));

    let tx = database.gate("batman");
    search.set_query("batman");
    assert_eq!(search.error(), None);
    assert_eq!(search.view(), SearchView::Loading);

    tx.send(Ok(vec![movie("tt0372784", "Batman Begins")])).unwrap();
    search.settle().await;
    assert_eq!(search.error(), None);
}

#[tokio::test]
async fn test_new_search_closes_detail_view() {
    let database = Arc::new(GatedDatabase::default());
    let _gate = database.gate("batman");
    let mut search = coordinator(&database);

    search.select_movie("tt0372784");
    assert!(!search.set_query("ba"));
    assert_eq!(search.selected_id(), Some("tt0372784"));

    search.set_query("batman");
    assert_eq!(search.selected_id(), None);
}

#[tokio::test]
async fn test_select_movie_toggles() {
    let database = Arc::new(GatedDatabase::default());
    let mut search = coordinator(&database);

    search.select_movie("tt0372784");
    assert_eq!(search.selected_id(), Some("tt0372784"));

    search.select_movie("tt1877830");
    assert_eq!(search.selected_id(), Some("tt1877830"));

    search.select_movie("tt1877830");
    assert_eq!(search.selected_id(), None);

    search.select_movie("tt0372784");
    search.close_movie();
    assert_eq!(search.selected_id(), None);
}

#[tokio::test]
async fn test_drop_aborts_in_flight_search() {
    let database = Arc::new(GatedDatabase::default());
    let mut tx = database.gate("batman");
    let mut search = coordinator(&database);

    search.set_query("batman");
    wait_for_calls(&database, 1).await;
    drop(search);

    tokio::time::timeout(Duration::from_secs(1), tx.closed())
        .await
        .expect("dropping the coordinator should abort the request");
}

#[tokio::test]
async fn test_min_query_length_from_config() {
    let database = Arc::new(GatedDatabase::default());
    let config = SearchConfig { min_query_length: 5 };
    let db: Arc<dyn MovieDatabase> = database.clone();
    let mut search = SearchCoordinator::new(db, SearchOptions::from(&config));

    assert!(!search.set_query("star"));
    assert!(search.set_query("starw"));
}
