use super::prompts::{prompt_number, prompt_secret, prompt_string};
use crate::output::{data_event, Output};
use crate::ConfigCommands;
use color_eyre::Result;
use popcorn_config::{Config, API_KEY_ENV};
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_path: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(config_path, full, output),
        ConfigCommands::Init {
            api_key,
            base_url,
            min_query_length,
        } => init_config(config_path, api_key, base_url, min_query_length, output),
        ConfigCommands::Path => {
            output.println(config_path.display().to_string());
            output.json(&data_event("config_path", json!(config_path.display().to_string())));
            Ok(())
        }
    }
}

fn show_config(config_path: &Path, full: bool, output: &Output) -> Result<()> {
    let mut config = Config::load_or_default(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    config.apply_env_overrides();

    let api_key = if full {
        config.omdb.api_key.clone()
    } else {
        config.omdb.masked_api_key()
    };

    if output.is_human() {
        output.println(format!("Config file: {}", config_path.display()));
        if !config_path.exists() {
            output.warn("Config file does not exist yet; showing defaults");
        }
        output.println(format!("  omdb.base_url          = {}", config.omdb.base_url));
        output.println(format!("  omdb.api_key           = {}", api_key));
        output.println(format!("  omdb.timeout_secs      = {}", config.omdb.timeout_secs));
        output.println(format!("  search.min_query_length = {}", config.search.min_query_length));
    } else {
        output.json(&data_event(
            "config",
            json!({
                "path": config_path.display().to_string(),
                "omdb": {
                    "base_url": config.omdb.base_url,
                    "api_key": api_key,
                    "timeout_secs": config.omdb.timeout_secs,
                },
                "search": { "min_query_length": config.search.min_query_length },
            }),
        ));
    }

    if let Err(e) = config.validate() {
        output.warn(e.to_string());
    }
    Ok(())
}

fn init_config(
    config_path: &Path,
    api_key: Option<String>,
    base_url: Option<String>,
    min_query_length: Option<usize>,
    output: &Output,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    // Prompt only when nothing was passed on the command line
    let interactive = api_key.is_none() && base_url.is_none() && min_query_length.is_none();

    if let Some(key) = api_key {
        config.omdb.api_key = key;
    } else if interactive {
        output.info(format!(
            "Get a free key at https://www.omdbapi.com/apikey.aspx (or set {})",
            API_KEY_ENV
        ));
        config.omdb.api_key = prompt_secret("OMDb API key")?;
    }

    if let Some(url) = base_url {
        config.omdb.base_url = url;
    } else if interactive {
        config.omdb.base_url = prompt_string("OMDb base URL", Some(&config.omdb.base_url))?;
    }

    if let Some(n) = min_query_length {
        config.search.min_query_length = n;
    } else if interactive {
        config.search.min_query_length = prompt_number("Minimum query length", config.search.min_query_length)?;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Refusing to save invalid configuration: {}", e))?;
    config
        .save_to_file(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_path.display(), e))?;

    tracing::info!(operation = "config_saved", path = %config_path.display(), "Configuration saved");
    output.success(format!("Configuration saved to {}", config_path.display()));
    Ok(())
}
