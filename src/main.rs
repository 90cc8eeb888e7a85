//! # FAQ Desk
//!
//! Answers questions from a curated FAQ list, falling back to a generative
//! model for a few keyword-triggered topics.
//!
//! Usage:
//!   faqdesk                              # Serve on 127.0.0.1:5000
//!   faqdesk --port 8080 --host 0.0.0.0   # Custom bind address
//!   faqdesk --faq-file ~/faqs.json       # Custom FAQ document
//!   faqdesk --init-config                # Write a default config and exit

use anyhow::{Context, Result};
use clap::Parser;
use faqdesk_core::FaqDeskConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 6] = [
    "faqdesk",
    "faqdesk_core",
    "faqdesk_store",
    "faqdesk_matcher",
    "faqdesk_providers",
    "faqdesk_gateway",
];

#[derive(Parser)]
#[command(name = "faqdesk", version, about = "💬 FAQ Desk: FAQ chat service")]
struct Cli {
    /// Config file (default: $FAQDESK_CONFIG or ~/.faqdesk/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// FAQ JSON document
    #[arg(long)]
    faq_file: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write a config file with defaults (plus any flags above) and exit
    #[arg(long)]
    init_config: bool,
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

fn log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut filter: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
    if verbose {
        filter.push("tower_http=debug".into());
    }
    filter.join(",")
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config
        .clone()
        .or_else(|| std::env::var("FAQDESK_CONFIG").ok())
        .map(|p| expand_path(&p))
}

fn load_config(cli: &Cli) -> Result<FaqDeskConfig> {
    let mut config = match config_path(cli) {
        Some(path) => FaqDeskConfig::load_from(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => FaqDeskConfig::load().context("loading default config")?,
    };
    config.apply_env_overrides();
    apply_cli_overrides(cli, &mut config);
    Ok(config)
}

/// Write a fresh config. Secrets from the environment are left out and an
/// existing file is never overwritten.
fn init_config(cli: &Cli) -> Result<PathBuf> {
    let path = config_path(cli).unwrap_or_else(FaqDeskConfig::default_path);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let mut config = FaqDeskConfig::default();
    apply_cli_overrides(cli, &mut config);
    config
        .save_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn apply_cli_overrides(cli: &Cli, config: &mut FaqDeskConfig) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(faq_file) = &cli.faq_file {
        config.server.faq_file = faq_file.clone();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose))),
        )
        .with_target(false)
        .init();

    if cli.init_config {
        let path = init_config(&cli)?;
        tracing::info!("📝 Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(&cli)?;
    tracing::info!("💬 FAQ Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "🎯 Match threshold: {} | FAQ file: {}",
        config.matcher.threshold,
        config.faq_path().display()
    );

    let state = faqdesk_gateway::AppState::from_config(&config)?;
    faqdesk_gateway::start(state, &config.server.host, config.server.port).await?;
    Ok(())
}
