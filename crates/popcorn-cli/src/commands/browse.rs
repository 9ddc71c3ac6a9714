use super::{create_database, load_config, render};
use crate::output::Output;
use color_eyre::Result;
use indicatif::ProgressBar;
use popcorn_core::{watched_from_details, SearchCompletion, SearchCoordinator, SearchOptions, WatchedList};
use popcorn_models::MovieDetails;
use popcorn_sources::MovieDatabase;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "\
Type a title to search (each new line cancels the search still running).
  :select <n|id>   show details for result n (again to close)
  :close           close the details view
  :watch <1-10>    add the open movie to your watched list with your rating
  :delete <n|id>   remove an entry from your watched list
  :watched         show your watched list and its summary
  :help            show this help
  :quit            leave (the watched list is not saved)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Query(String),
    Select(String),
    Close,
    Watch(String),
    Delete(String),
    Watched,
    Help,
    Quit,
    Unknown(String),
}

/// Plain lines are queries; lines starting with ':' are commands
pub fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        return BrowseCommand::Query(line.to_string());
    };

    let (name, arg) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };

    match name {
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "h" | "help" | "?" => BrowseCommand::Help,
        "c" | "close" => BrowseCommand::Close,
        "w" | "watched" => BrowseCommand::Watched,
        "s" | "select" if !arg.is_empty() => BrowseCommand::Select(arg.to_string()),
        "watch" if !arg.is_empty() => BrowseCommand::Watch(arg.to_string()),
        "d" | "rm" | "delete" if !arg.is_empty() => BrowseCommand::Delete(arg.to_string()),
        _ => BrowseCommand::Unknown(line.to_string()),
    }
}

/// A 1-based list position resolves against `ids`; anything else is taken as an id
pub fn resolve_reference<'a>(arg: &str, mut ids: impl Iterator<Item = &'a str>) -> Option<String> {
    match arg.parse::<usize>() {
        Ok(0) => None,
        Ok(position) => ids.nth(position - 1).map(str::to_string),
        Err(_) => Some(arg.to_string()),
    }
}

enum BrowseEvent {
    Input(Option<String>),
    Completed(SearchCompletion),
}

struct BrowseSession<'a> {
    output: &'a Output,
    database: Arc<dyn MovieDatabase>,
    search: SearchCoordinator,
    watched: WatchedList,
    details: Option<MovieDetails>,
    spinner: Option<ProgressBar>,
    min_query_length: usize,
}

impl<'a> BrowseSession<'a> {
    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn on_query(&mut self, query: String) {
        self.stop_spinner();
        let started = self.search.set_query(query.as_str());

        // A new search closes the detail view
        if self.search.selected_id().is_none() {
            self.details = None;
        }

        if started {
            self.spinner = Some(render::spinner(format!("Searching for '{}'...", query)));
        } else if !query.is_empty() {
            self.output
                .info(format!("Type at least {} characters to search", self.min_query_length));
        }
    }

    fn on_completion(&mut self, completion: SearchCompletion) {
        if self.search.apply(completion) {
            self.stop_spinner();
            render::show_search_view(self.output, self.search.view());
        }
    }

    async fn on_select(&mut self, arg: &str) {
        let reference = resolve_reference(arg, self.search.movies().iter().map(|m| m.imdb_id.as_str()));
        let Some(imdb_id) = reference else {
            self.output.warn(format!("No result number {}", arg));
            return;
        };

        self.search.select_movie(&imdb_id);
        let Some(selected) = self.search.selected_id().map(str::to_string) else {
            self.details = None;
            render::show_watched(self.output, &self.watched);
            return;
        };

        let spinner = render::spinner(format!("Loading {}...", selected));
        let result = self.database.get_details(&selected).await;
        spinner.finish_and_clear();

        match result {
            Ok(details) => {
                render::show_details(self.output, &details, self.watched.user_rating(&selected));
                self.details = Some(details);
            }
            Err(e) => {
                debug!(operation = "browse_details", imdb_id = %selected, error = %e.detail(), "Details lookup failed");
                self.output.error(e.to_string());
                self.search.close_movie();
                self.details = None;
            }
        }
    }

    fn on_close(&mut self) {
        self.search.close_movie();
        self.details = None;
        render::show_watched(self.output, &self.watched);
    }

    fn on_watch(&mut self, arg: &str) {
        let Some(details) = self.details.as_ref() else {
            self.output.warn("Open a movie with :select first");
            return;
        };

        let rating = match arg.parse::<u8>() {
            Ok(rating) => rating,
            Err(_) => {
                self.output.warn(format!("'{}' is not a rating between 1 and 10", arg));
                return;
            }
        };

        match watched_from_details(details, rating).and_then(|movie| self.watched.add(movie)) {
            Ok(()) => {
                self.output.success(format!("Added {} to your watched list", details.title));
                self.on_close();
            }
            Err(e) => self.output.warn(e.to_string()),
        }
    }

    fn on_delete(&mut self, arg: &str) {
        let reference = resolve_reference(arg, self.watched.iter().map(|m| m.imdb_id.as_str()));
        match reference {
            Some(imdb_id) if self.watched.remove(&imdb_id) => {
                self.output.success(format!("Removed {} from your watched list", imdb_id));
                render::show_watched(self.output, &self.watched);
            }
            _ => self.output.warn(format!("'{}' is not in your watched list", arg)),
        }
    }

    fn prompt(&self) {
        if self.output.is_human() && self.spinner.is_none() {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    }
}

pub async fn run_browse(config_path: &Path, output: &Output) -> Result<()> {
    let config = load_config(config_path)?;
    let database = create_database(&config)?;

    let mut session = BrowseSession {
        output,
        search: SearchCoordinator::new(Arc::clone(&database), SearchOptions::from(&config.search)),
        database,
        watched: WatchedList::new(),
        details: None,
        spinner: None,
        min_query_length: config.search.min_query_length,
    };

    info!(operation = "browse_start", "Interactive session started");
    output.println(HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        session.prompt();

        let event = tokio::select! {
            line = lines.next_line() => BrowseEvent::Input(line?),
            Some(completion) = session.search.recv_completion() => BrowseEvent::Completed(completion),
        };

        match event {
            BrowseEvent::Completed(completion) => session.on_completion(completion),
            BrowseEvent::Input(None) => break,
            BrowseEvent::Input(Some(line)) => match parse_command(&line) {
                BrowseCommand::Query(query) => session.on_query(query),
                BrowseCommand::Select(arg) => session.on_select(&arg).await,
                BrowseCommand::Close => session.on_close(),
                BrowseCommand::Watch(arg) => session.on_watch(&arg),
                BrowseCommand::Delete(arg) => session.on_delete(&arg),
                BrowseCommand::Watched => render::show_watched(output, &session.watched),
                BrowseCommand::Help => output.println(HELP),
                BrowseCommand::Quit => break,
                BrowseCommand::Unknown(line) => output.warn(format!("Unknown command '{}' (try :help)", line)),
            },
        }
    }

    session.stop_spinner();
    session.search.cancel();
    info!(
        operation = "browse_end",
        watched = session.watched.len(),
        "Interactive session ended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_queries() {
        assert_eq!(parse_command("batman"), BrowseCommand::Query("batman".to_string()));
        assert_eq!(parse_command("  star wars\r\n"), BrowseCommand::Query("  star wars".to_string()));
        assert_eq!(parse_command(""), BrowseCommand::Query(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command(":q"), BrowseCommand::Quit);
        assert_eq!(parse_command(":help"), BrowseCommand::Help);
        assert_eq!(parse_command(":close"), BrowseCommand::Close);
        assert_eq!(parse_command(":watched"), BrowseCommand::Watched);
        assert_eq!(parse_command(":select 2"), BrowseCommand::Select("2".to_string()));
        assert_eq!(parse_command(":s tt1375666"), BrowseCommand::Select("tt1375666".to_string()));
        assert_eq!(parse_command(":watch  8 "), BrowseCommand::Watch("8".to_string()));
        assert_eq!(parse_command(":delete 1"), BrowseCommand::Delete("1".to_string()));
    }

    #[test]
    fn test_commands_missing_argument_are_unknown() {
        assert_eq!(parse_command(":select"), BrowseCommand::Unknown(":select".to_string()));
        assert_eq!(parse_command(":watch"), BrowseCommand::Unknown(":watch".to_string()));
        assert_eq!(parse_command(":frobnicate"), BrowseCommand::Unknown(":frobnicate".to_string()));
    }

    #[test]
    fn test_resolve_reference() {
        let ids = ["tt0000001", "tt0000002"];
        assert_eq!(resolve_reference("2", ids.iter().copied()), Some("tt0000002".to_string()));
        assert_eq!(resolve_reference("3", ids.iter().copied()), None);
        assert_eq!(resolve_reference("0", ids.iter().copied()), None);
        assert_eq!(resolve_reference("tt9", ids.iter().copied()), Some("tt9".to_string()));
    }
}
