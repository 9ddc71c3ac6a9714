use super::{create_database, load_config, render};
use crate::output::Output;
use color_eyre::Result;
use popcorn_core::{SearchCoordinator, SearchOptions};
use std::path::Path;

pub async fn run_search(query: String, config_path: &Path, output: &Output) -> Result<()> {
    tracing::debug!(operation = "search_command", query = %query, "Search command started");

    let config = load_config(config_path)?;
    let database = create_database(&config)?;
    let mut search = SearchCoordinator::new(database, SearchOptions::from(&config.search));

    if !search.set_query(query.as_str()) {
        output.warn(format!(
            "Type at least {} characters to search",
            config.search.min_query_length
        ));
        return Ok(());
    }

    let spinner = render::spinner(format!("Searching for '{}'...", query));
    search.settle().await;
    spinner.finish_and_clear();

    render::show_search_view(output, search.view());
    Ok(())
}
