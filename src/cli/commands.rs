//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "moodmap")]
#[command(about = "Chat mood-mapping bot: tone analysis, mood points and chart feedback")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: level from config)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the TOML configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default: from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (default: from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS for all origins
        #[arg(long)]
        cors: bool,
    },
    /// Score a single text and show the mood point of a new user
    Analyze {
        /// Text to analyze
        text: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chat with the bot on the terminal
    Chat {
        /// User id to chat as
        #[arg(short, long, default_value = "local")]
        user: String,
        /// Display name (default: the user id)
        #[arg(short, long)]
        name: Option<String>,
        /// Conversation id (default: a fresh one)
        #[arg(long)]
        conversation: Option<String>,
    },
    /// Show current configuration
    Config,
}
