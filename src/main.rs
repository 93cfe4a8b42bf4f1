//! # Console Host
//!
//! Runs the command handler against the console platform:
//! - Loads `data/config.yaml` (or `--config`) and installs logging
//! - Builds the handler from the built-in definitions and manifest callbacks
//! - Opens the database session when one is configured
//! - Registers commands, then routes one JSON interaction per stdin line
//!

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use slcommands::domain::permissions::Permissions;
use slcommands::domain::types::{Interaction, Member};
use slcommands::infrastructure::console::ConsolePlatform;
use slcommands::infrastructure::logging;
use slcommands::interface::commands;
use slcommands::{Handler, HandlerConfig};

#[derive(Parser, Debug)]
#[command(name = "slcommands", about = "Slash-command handler over a console platform")]
struct Args {
    /// Handler configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Overrides `logging.directory` from the configuration
    #[arg(long)]
    log_dir: Option<String>,

    /// Extra test server ids
    #[arg(long = "test-server")]
    test_servers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = if args.config.exists() {
        HandlerConfig::load(&args.config)?
    } else {
        HandlerConfig::default()
    };
    if let Some(dir) = args.log_dir {
        config.logging.directory = dir;
    }

    // 2. Logging Setup
    let _guard = logging::init(&config.logging)?;
    tracing::info!("Starting slcommands...");
    if !args.config.exists() {
        tracing::warn!("{} not found, using defaults", args.config.display());
    }

    // 3. Platform and Handler
    let bot = Member {
        id: "bot".to_string(),
        display_name: Some("slcommands".to_string()),
        permissions: Permissions::administrator(),
    };
    let platform = Arc::new(ConsolePlatform::new(bot));

    let builder = Handler::builder(platform, config)
        .definitions(commands::DEFINITIONS)
        .callbacks(commands::callbacks())
        .add_test_servers(args.test_servers);

    #[cfg(feature = "redis")]
    let builder =
        builder.store(Arc::new(slcommands::infrastructure::redis_store::RedisStore::new()));

    let handler = builder.build();

    handler.events().on_command_exception(|e| {
        tracing::error!(command = %e.command, error = ?e.error, "Command failed");
    });
    handler.events().on_database_connected(|e| {
        tracing::info!("Database session is {}", e.state);
    });

    // 4. Session Bootstrap
    if let Err(e) = handler.connect_database().await {
        tracing::error!("Continuing without a database: {:#}", e);
    }

    // 5. Ready
    handler.on_ready().await;

    // 6. Event Loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Interaction>(&line) {
            Ok(interaction) => {
                let outcome = handler.dispatch(interaction).await;
                tracing::debug!("Interaction outcome: {:?}", outcome);
            }
            Err(e) => tracing::warn!("Ignoring malformed interaction: {}", e),
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
