use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{browse, config, control};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "plexkit")]
#[command(about = "Browse media server libraries and drive their players")]
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

    /// Server to talk to (defaults to the first configured server)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Which listing of a section to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Listing {
    All,
    Unwatched,
    Newest,
    RecentlyAdded,
    RecentlyViewed,
    OnDeck,
}

#[derive(Subcommand)]
enum Commands {
    /// List library sections
    Sections,

    /// List items of a section
    #[command(long_about = "List the items of a section, selected by key or exact title. Use --filter key=value (repeatable) to query the filtered listing instead.")]
    Items {
        /// Section key or exact title
        section: String,

        #[arg(long, value_enum, default_value = "all")]
        listing: Listing,

        /// Filter pair sent to the section's filtered listing, e.g. --filter year=1979
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },

    /// Search a section
    Search {
        /// Section key or exact title
        section: String,

        query: String,

        /// What to search for (movies, shows, episodes, artists, albums, tracks, photos)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Show one item by rating key
    Item {
        rating_key: u64,

        /// List the item's children (seasons, episodes, albums, tracks)
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["leaves", "random_leaf"])]
        children: bool,

        /// List every leaf below a show or artist
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "random_leaf")]
        leaves: bool,

        /// Pick a random leaf below a show or artist
        #[arg(long, action = ArgAction::SetTrue)]
        random_leaf: bool,
    },

    /// List players attached to the server
    Clients,

    /// Send a command to a player
    #[command(long_about = "Send a navigation or playback command (e.g. moveUp, pause, skipNext) to a player. 'setVolume' takes --level, 'playMedia' takes --rating-key and optionally --offset.")]
    Control {
        /// Player name as listed by 'plexkit clients'
        client: String,

        command: String,

        /// Volume percentage for setVolume
        #[arg(long)]
        level: Option<u8>,

        /// Item to play for playMedia
        #[arg(long)]
        rating_key: Option<u64>,

        /// Start position in milliseconds for playMedia
        #[arg(long)]
        offset: Option<i64>,
    },

    /// Manage servers and tokens
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (tokens masked)
    Show {
        /// Show tokens unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Add or replace a server
    AddServer {
        name: String,

        address: String,

        #[arg(long, default_value_t = plexkit_config::DEFAULT_PORT)]
        port: u16,

        #[arg(long, default_value = "http")]
        scheme: String,
    },

    /// Store the auth token of a server in the credentials file
    SetToken {
        server: String,

        /// Token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let settings = commands::load_settings()?;
    logging::init_logging(cli.verbose, cli.quiet, &settings.config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Sections => browse::run_sections(&settings, server, &output),
        Commands::Items { section, listing, filters } => {
            browse::run_items(&settings, server, &section, listing, &filters, &output)
        }
        Commands::Search { section, query, kind } => {
            browse::run_search(&settings, server, &section, &query, kind.as_deref(), &output)
        }
        Commands::Item { rating_key, children, leaves, random_leaf } => {
            browse::run_item(&settings, server, rating_key, children, leaves, random_leaf, &output)
        }
        Commands::Clients => control::run_clients(&settings, server, &output),
        Commands::Control { client, command, level, rating_key, offset } => control::run_control(
            &settings,
            server,
            control::ControlArgs { client, command, level, rating_key, offset },
            &output,
        ),
        Commands::Config { cmd } => config::run_config(cmd, settings, &output),
    }
}
