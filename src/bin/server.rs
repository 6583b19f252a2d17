use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pm_autocomplete::config::Config;
use pm_autocomplete::server::{serve, AppState};
use pm_autocomplete::Autocomplete;

#[derive(Debug, Parser)]
#[command(about = "Serve word suggestions over HTTP")]
struct Args {
    /// TOML config file (defaults to $PM_AUTOCOMPLETE_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    pm_autocomplete::init_tracing();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let engine = Autocomplete::new(config.builder());
    serve(AppState::new(engine, config)).await
}
