use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, details, search};
use popcorn_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - search movies and keep track of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this configuration file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie database by title
    #[command(long_about = "Run a single title search and print the matches. Queries shorter than the configured minimum (3 characters by default) are not sent.")]
    Search {
        /// Title or part of a title
        query: String,
    },
    /// Show details for a single title
    Details {
        /// IMDb id, e.g. tt1375666
        imdb_id: String,
    },
    /// Interactive session: search, inspect, and keep a watched list
    #[command(long_about = "Start an interactive session. Every line you type is a new search that cancels the one still running. Commands start with ':' (type :help). The watched list lives only for the duration of the session.")]
    Browse,
    /// View or write the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a configuration file, prompting for anything not given
    Init {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// OMDb base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Minimum query length before a search is sent
        #[arg(long)]
        min_query_length: Option<usize>,
    },
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Browse => Some(PathManager::default().browse_log_file()),
        _ => None,
    };
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialise logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = commands::config_path(cli.config);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &config_path, &output).await,
        Commands::Details { imdb_id } => details::run_details(&imdb_id, &config_path, &output).await,
        Commands::Browse => browse::run_browse(&config_path, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &config_path, &output)
        }
    }
}
