use clap::{ArgAction, Parser, Subcommand};
use shelf_models::MediaType;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - your tracked movies, shows, music and books alongside what's trending")]
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

    /// Write logs to a daily-rotated file instead of stderr (defaults to
    /// shelf.log in the config directory when no path is given)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a discovery feed and tracked records read from JSON files
    #[command(long_about = "Merge a discovery feed and a list of tracked records, both given as JSON files shaped like the API responses, and print the resulting collection. Either file may be omitted.")]
    Merge {
        /// Discovery feed JSON (array of discovered media)
        #[arg(long, value_name = "FILE")]
        discovered: Option<PathBuf>,

        /// Tracked records JSON (array of user media records)
        #[arg(long, value_name = "FILE")]
        tracked: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Fetch and show a collection from the API
    #[command(long_about = "Fetch the discovery feed and your tracked records for one media type from the configured API, merge them, and print the collection. Requires `shelf config login`.")]
    Collection {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show or change configuration and session
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(clap::Args)]
pub struct ViewArgs {
    /// Media type: movie, tv, music or books (defaults to the configured type)
    #[arg(long = "type", value_name = "TYPE")]
    pub media_type: Option<MediaType>,

    /// Only show items you track
    #[arg(long, action = ArgAction::SetTrue)]
    pub tracked_only: bool,

    /// Print how each tracked record was matched
    #[arg(long, action = ArgAction::SetTrue)]
    pub stats: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the session token)
    Show,

    /// Configure the backend API
    Api {
        /// Base URL, e.g. https://shelf.example/api
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Collection shown when --type is not given
        #[arg(long, value_name = "TYPE")]
        default_type: Option<MediaType>,
    },

    /// Store a session for the API
    Login {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        token: String,

        /// Session expiry (RFC 3339); sessions without one never expire
        #[arg(long, value_name = "TIMESTAMP")]
        expires: Option<String>,
    },

    /// Forget the stored session
    Logout,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Merge { discovered, tracked, view } => {
            commands::merge::run_merge(discovered, tracked, &view, &output).await
        }
        Commands::Collection { view } => commands::collection::run_collection(&view, &output).await,
        Commands::Config { cmd } => commands::config::run_config(cmd.unwrap_or(ConfigCommands::Show), &output),
    }
}
