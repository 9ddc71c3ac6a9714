use super::{create_database, load_config, render};
use crate::output::Output;
use color_eyre::Result;
use popcorn_sources::MovieDatabase;
use std::path::Path;

pub async fn run_details(imdb_id: &str, config_path: &Path, output: &Output) -> Result<()> {
    let config = load_config(config_path)?;
    let database = create_database(&config)?;

    let spinner = render::spinner(format!("Loading {}...", imdb_id));
    let result = database.get_details(imdb_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(details) => render::show_details(output, &details, None),
        Err(e) => {
            tracing::warn!(operation = "details_command", imdb_id, error = %e.detail(), "Details lookup failed");
            output.error(e.to_string());
        }
    }
    Ok(())
}
