//! `pm_autocomplete lexicon`
//!
//! Builds the autocomplete lexicon from the configured sources and
//! reports what each provider contributed.
//!
//! Usage:
//!   cargo run --bin lexicon -- --config autocomplete.toml
//!   cargo run --bin lexicon -- --dump > vocabulary.txt

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pm_autocomplete::config::Config;
use pm_autocomplete::lexicon::SourceReport;

#[derive(Debug, Parser)]
#[command(about = "Build the autocomplete lexicon and print statistics")]
struct Args {
    /// TOML config file (defaults to $PM_AUTOCOMPLETE_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the sorted vocabulary to stdout, one word per line
    #[arg(long)]
    dump: bool,
}

fn print_source(report: &SourceReport) {
    match &report.outcome {
        Ok(n) => eprintln!("      ok      {:>8}  {}", n, report.name),
        Err(e) => eprintln!("      FAILED            {}  ({e})", report.name),
    }
}

fn main() -> Result<()> {
    pm_autocomplete::init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("failed to load config")?;
    let builder = config.builder();

    eprintln!("[1/2] Building lexicon from {} word sources…", builder.word_source_count());
    let lexicon = builder.build();

    eprintln!("[2/2] Sources:");
    let report = lexicon.report();
    for source in &report.word_sources {
        print_source(source);
    }
    match &report.frequency_source {
        Some(source) => print_source(source),
        None => eprintln!("      (no frequency source configured)"),
    }

    eprintln!(
        "      {} words  |  {} with frequency data{}",
        lexicon.len(),
        lexicon.frequency_len(),
        if report.is_degraded() { "  |  degraded: domain vocabulary only" } else { "" }
    );

    if args.dump {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for word in lexicon.vocabulary() {
            writeln!(out, "{word}")?;
        }
        out.flush()?;
    }
    Ok(())
}
