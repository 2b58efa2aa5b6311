//! `ff` command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser, Subcommand};
use ff::{Context, ContextConfig, DEFAULT_ROOT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Personal signed feed and blob store
#[derive(Parser)]
#[command(name = "ff")]
#[command(about = "ff - personal append-only signed feed and blob store", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage root
    #[arg(long, env = "FF_ROOT", default_value = DEFAULT_ROOT, global = true)]
    root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a post to the local feed
    Msg {
        /// Post text
        text: String,
    },
    /// Import a file into the blob store
    Blob {
        /// File to import
        path: PathBuf,
    },
    /// Check every message of the local feed
    Verify,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = ContextConfig::new(cli.root);
    let ctx = Context::open(&config)
        .with_context(|| format!("failed to open storage root {}", config.root.display()))?;

    match command {
        Commands::Msg { text } => {
            let msg = ctx
                .feed()
                .append_post(&text)
                .context("failed to append message")?;
            let id = msg.id().context("failed to compute message id")?;
            println!("Wrote message {}: {}", msg.sequence(), id);
        }
        Commands::Blob { path } => {
            let record = ctx
                .import_blob(&path)
                .with_context(|| format!("failed to import blob {}", path.display()))?;
            if !record.result.is_inserted() {
                tracing::info!(blob = %record.id, "blob was already stored");
            }
            println!("Imported blob: {}", record.id);
        }
        Commands::Verify => {
            let summary = ctx.feed().verify().context("feed verification failed")?;
            match summary.head {
                Some(head) => println!("{}: {} messages, head {}", summary.id, summary.count, head),
                None => println!("{}: empty feed", summary.id),
            }
        }
    }

    Ok(())
}
