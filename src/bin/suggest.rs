//! `pm_autocomplete suggest`
//!
//! Builds the lexicon once, then answers prefix queries.
//!
//! Usage (single query):
//!   cargo run --bin suggest -- req
//!   cargo run --bin suggest -- --context the pro
//!
//! Usage (interactive REPL, `[context] prefix` per line):
//!   cargo run --bin suggest

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pm_autocomplete::config::Config;
use pm_autocomplete::suggest::suggest_and_print;
use pm_autocomplete::Autocomplete;

#[derive(Debug, Parser)]
#[command(about = "Rank word suggestions for a prefix")]
struct Args {
    /// TOML config file (defaults to $PM_AUTOCOMPLETE_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word immediately preceding the prefix
    #[arg(long)]
    context: Option<String>,

    /// Maximum suggestions to print (clamped to the configured maximum)
    #[arg(long)]
    limit: Option<i64>,

    /// Prefix to complete; omit to start the REPL
    prefix: Option<String>,
}

/// Split a REPL line into `(context, prefix)`; the last token is the prefix.
fn parse_line(line: &str) -> Option<(Option<&str>, &str)> {
    let mut tokens = line.split_whitespace().rev();
    let prefix = tokens.next()?;
    Some((tokens.next(), prefix))
}

fn main() -> Result<()> {
    pm_autocomplete::init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("failed to load config")?;
    let limit = config.clamp_limit(args.limit);
    let engine = Autocomplete::new(config.builder());

    // ── Build lexicon ───────────────────────────────────────────────────────
    eprint!("Building lexicon… ");
    let lexicon = engine.warm();
    eprintln!(
        "OK ({} words, {} with frequency data)",
        lexicon.len(),
        lexicon.frequency_len()
    );

    // ── Single query from CLI args ──────────────────────────────────────────
    if let Some(prefix) = &args.prefix {
        suggest_and_print(prefix, args.context.as_deref(), limit, lexicon);
        return Ok(());
    }

    // ── Interactive REPL ────────────────────────────────────────────────────
    println!("Type `[context] prefix` and press Enter. Ctrl-D / empty line to exit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some((context, prefix)) = parse_line(&line) else {
            break;
        };
        suggest_and_print(prefix, context.or(args.context.as_deref()), limit, lexicon);
    }

    Ok(())
}
