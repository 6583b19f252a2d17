pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod server;
pub mod sources;
pub mod suggest;
pub mod text;

pub use crate::engine::Autocomplete;

use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
