//! Links Vault CLI
//!
//! Command-line interface for Links Vault - organize and manage your
//! favorite links.

use anyhow::Result;
use clap::{Parser, Subcommand};

use lvault_core::Config;

mod commands;
mod logging;
mod output;
mod prompt;
mod tui;

use commands::link::EditArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "lvault")]
#[command(about = "Links Vault - Organize and manage your favorite links")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a new link
    #[command(alias = "create")]
    Add {
        /// Link title
        title: String,
        /// URL to save (scheme optional)
        url: String,
        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Tags, comma-separated ("work, dev, tools")
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// List all links, newest first
    #[command(alias = "ls")]
    List,
    /// Search titles, urls, descriptions and tags
    Search {
        /// Search term (case-insensitive)
        term: String,
    },
    /// Show link details
    Show {
        /// Link ID (or a unique leading part of it)
        id: String,
    },
    /// Edit a link (prompts for each field when no flags are given)
    Edit {
        /// Link ID (or a unique leading part of it)
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
        /// New tags, comma-separated (empty string clears them)
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (or a unique leading part of it)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a link in the browser
    Open {
        /// Link ID (or a unique leading part of it)
        id: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, storage_key, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let command = match cli.command {
        // The TUI is the default, like opening the vault page
        None | Some(Commands::Tui) => return tui::run(),
        Some(Commands::Config { command }) => {
            return handle_config_command(command, &output);
        }
        Some(command) => command,
    };

    logging::init_cli_logging();

    let config = Config::load()?;
    let mut store = commands::open_store(&config);

    let result = match command {
        Commands::Add {
            title,
            url,
            description,
            tags,
        } => commands::link::add(&mut store, title, url, description, tags, &output),
        Commands::List => commands::link::list(&store, &output),
        Commands::Search { term } => commands::link::search(&store, &term, &output),
        Commands::Show { id } => commands::link::show(&store, &id, &output),
        Commands::Edit {
            id,
            title,
            url,
            description,
            tags,
        } => {
            let args = EditArgs {
                title,
                url,
                description,
                tags,
            };
            commands::link::edit(&mut store, &id, args, &output)
        }
        Commands::Delete { id, yes } => commands::link::delete(&mut store, &id, yes, &output),
        Commands::Open { id } => commands::link::open(&store, &id, &output),
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
    };

    // The mutation itself succeeded; a failed write is only a warning
    commands::report_save_error(&mut store, &output);

    result
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
