//! Claude-Light MCP server entry point.
//!
//! With no argument, serves the tools to the desktop assistant. With
//! `install` or `uninstall`, edits the assistant's config file and prints it.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use claude_light_mcp::cli::{self, Cli, Command, USAGE};
use claude_light_mcp::core::Config;
use claude_light_mcp::domains::registration::{Platform, Registrar};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env();

    init_logging(&config.logging.level);

    match args.command() {
        Command::Serve => serve(config).await?,
        Command::Install => {
            let registrar = Registrar::for_platform(&Platform::current(), &config.registration)?;
            let executable = cli::current_executable()?;
            let document = cli::install(&registrar, &executable)?;
            println!(
                "Installed {}. Here is your current {}. Please restart Claude Desktop.",
                registrar.server_key(),
                registrar.path().display()
            );
            println!("{document}");
        }
        Command::Uninstall => {
            let registrar = Registrar::for_platform(&Platform::current(), &config.registration)?;
            let document = cli::uninstall(&registrar)?;
            println!(
                "Uninstalled {}. Here is your current {}.",
                registrar.server_key(),
                registrar.path().display()
            );
            println!("{document}");
        }
        Command::Unknown(arg) => {
            warn!("Unrecognized argument: {}", arg);
            println!("{USAGE}");
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);

    cli::serve(config).await?;

    info!("Server shutting down");
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP channel and printed documents.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
