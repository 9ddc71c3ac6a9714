use crate::output::{data_event, Output};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use popcorn_core::{SearchView, WatchedList, WatchedSummary};
use popcorn_models::{MovieDetails, MovieSummary};
use serde_json::json;
use std::io::IsTerminal;
use std::time::Duration;

fn is_interactive() -> bool {
    std::io::stderr().is_terminal() && std::env::var("CI").is_err()
}

/// Loading indicator. Hidden when stderr is not a terminal.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    if !is_interactive() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(msg.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn movies_table(movies: &[MovieSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Title", "Year", "IMDb id"]);
    for (i, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.imdb_id),
        ]);
    }
    table
}

pub fn watched_table(watched: &WatchedList) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Title", "IMDb", "You", "Runtime", "IMDb id"]);
    for (i, movie) in watched.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&movie.title),
            Cell::new(movie.imdb_rating.map_or_else(|| "-".to_string(), |r| format!("{:.1}", r))),
            Cell::new(movie.user_rating),
            Cell::new(movie.runtime.map_or_else(|| "-".to_string(), |m| format!("{} min", m))),
            Cell::new(&movie.imdb_id),
        ]);
    }
    table
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies  ⭐️ {:.2}  🌟 {:.2}  ⏳ {:.0} min",
        summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
    )
}

pub fn details_text(details: &MovieDetails, user_rating: Option<u8>) -> String {
    let mut lines = vec![
        format!("{} ({})", details.title.bold(), details.year),
        format!("{} • {}", details.released, details.runtime),
        details.genre.clone(),
        format!("⭐️ {} IMDb rating", details.imdb_rating),
        String::new(),
        details.plot.clone(),
        format!("Starring {}", details.actors),
        format!("Directed by {}", details.director),
    ];
    match user_rating {
        Some(rating) => lines.push(format!("You rated this movie {} ⭐️", rating)),
        None => lines.push("Not watched yet. Rate it with :watch <1-10>".to_string()),
    }
    lines.join("\n")
}

pub fn show_movies(output: &Output, movies: &[MovieSummary]) {
    if output.is_human() {
        output.println(movies_table(movies).to_string());
        output.info(format!("Found {} results", movies.len()));
    } else {
        output.json(&data_event("results", json!(movies)));
    }
}

/// Render whichever of loading / error / results is current
pub fn show_search_view(output: &Output, view: SearchView<'_>) {
    match view {
        SearchView::Loading => output.info("Loading..."),
        SearchView::Error(message) => output.error(message),
        SearchView::Results(movies) => show_movies(output, movies),
    }
}

pub fn show_details(output: &Output, details: &MovieDetails, user_rating: Option<u8>) {
    if output.is_human() {
        output.println(details_text(details, user_rating));
    } else {
        output.json(&data_event(
            "details",
            json!({ "movie": details, "user_rating": user_rating }),
        ));
    }
}

pub fn show_watched(output: &Output, watched: &WatchedList) {
    let summary = watched.summary();
    if output.is_human() {
        output.println(summary_line(&summary));
        if !watched.is_empty() {
            output.println(watched_table(watched).to_string());
        }
    } else {
        let movies: Vec<_> = watched.iter().collect();
        output.json(&data_event(
            "watched",
            json!({ "summary": summary, "movies": movies }),
        ));
    }
}
