// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tether - operator CLI for the offline-resilient delivery core.
//!
//! Inspects and manages the persisted outbound queue and validates
//! configuration. It never talks to the backend.

mod queue;
mod status;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tether_config::model::TetherConfig;
use tether_core::MessageKind;

/// Tether - operator CLI for the delivery core.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about, long_about = None)]
struct Cli {
    /// Explicit configuration file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the outbound queue backlog.
    Status {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Queue a message for delivery on the next drain.
    Enqueue {
        /// Message text.
        payload: String,
        /// Message kind (spontaneous, reminder_response, check_in, emergency).
        #[arg(long, default_value = "spontaneous", value_parser = parse_kind)]
        kind: MessageKind,
        /// Subject id; defaults to `device.subject_id`.
        #[arg(long)]
        subject: Option<String>,
    },
    /// Drop every queued message.
    ClearQueue {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Validate and print the effective configuration.
    Config,
}

fn parse_kind(value: &str) -> Result<MessageKind, String> {
    MessageKind::from_str(value).map_err(|_| format!("unknown message kind: {value}"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tether_config::load_and_validate_path(path),
        None => tether_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tether_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging.level);

    let result = match cli.command {
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        Some(Commands::Enqueue {
            payload,
            kind,
            subject,
        }) => queue::run_enqueue(&config, subject.as_deref(), &payload, kind).await,
        Some(Commands::ClearQueue { yes }) => queue::run_clear(&config, yes).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("tether: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &TetherConfig) -> Result<(), tether_core::TetherError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| tether_core::TetherError::Config(format!("failed to render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tether={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
