//! Tracing setup.
//!
//! Events from quill and from the HTTP trace layer are logged at the
//! configured level; sqlx is held at `warn` so statement logging stays quiet.
//! A non-empty `RUST_LOG` replaces these defaults entirely.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Normalize a configured level, falling back to `info`.
fn level_name(level: &str) -> &'static str {
    let level = level.trim().to_ascii_lowercase();
    let level = if level == "warning" { "warn" } else { level.as_str() };
    LEVELS
        .iter()
        .copied()
        .find(|l| *l == level)
        .unwrap_or("info")
}

/// Default filter directives for a configured level.
fn default_directives(level: &str) -> String {
    let level = level_name(level);
    format!("quill={level},tower_http={level},sqlx=warn,warn")
}

fn filter_for(level: &str) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => EnvFilter::new(env),
        _ => EnvFilter::new(default_directives(level)),
    }
}

/// Log to stdout and append to the configured file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = Path::new(&config.file);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(filter_for(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(Arc::new(file)))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Log to stdout only. Used when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
