use clap::Parser;
use moodmap::cli::*;
use moodmap::config::AppConfig;
use moodmap::Result;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_layered(Some(path.as_path()))?,
        None => AppConfig::load()?,
    };
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    // Initialize logging: the server logs to file too, interactive commands only to stderr
    match cli.command {
        Commands::Serve { .. } => {
            moodmap::logging::init_logging_to(&config.logging.directory, level)?;
        }
        _ => {
            moodmap::logging::init_simple_logging(if cli.verbose { "debug" } else { "warn" })?;
        }
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            handle_serve_api(&config, host, port, cors).await?;
        }
        Commands::Analyze { text, json } => {
            handle_analyze(&config, &text, json).await?;
        }
        Commands::Chat {
            user,
            name,
            conversation,
        } => {
            handle_chat(&config, user, name, conversation).await?;
        }
        Commands::Config => {
            handle_config_command(&config)?;
        }
    }

    Ok(())
}
