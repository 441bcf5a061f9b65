//! Command-line client for the smart city knowledge base
//!
//! Loads the engine configuration and seed facts, then runs one command
//! against an in-memory knowledge base. Logs go to stderr; reports go to
//! stdout.

use anyhow::{Context, Result};
use clap::Parser;
use smartcity_cli::{run, Command, Format};
use smartcity_core::EngineConfig;
use smartcity_query::KnowledgeBase;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartcity")]
#[command(about = "Smart City - area metrics, service needs and quantified queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "smartcity.toml")]
    config: PathBuf,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::resolve(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let kb = KnowledgeBase::from_config(&config).context("loading seed facts")?;
    tracing::debug!(
        areas = kb.store().len(),
        policy = %config.duplicate_policy,
        "Knowledge base ready"
    );

    let format = if cli.json { Format::Json } else { Format::Text };
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&kb, &cli.command, stdin.lock(), &mut stdout.lock(), format)
}
