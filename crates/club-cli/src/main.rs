use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use club_cli::{Cli, parse, render};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let (config, events) = match parse::parse_input(&text) {
        Ok(parsed) => parsed,
        Err(error) => {
            // Reference behavior: echo the offending raw line, nothing else,
            // and still exit 0.
            tracing::debug!(%error, "rejecting malformed input");
            println!("{}", error.line);
            return Ok(());
        }
    };

    let outcome = club_core::process(&config, &events).context("event log cannot be replayed")?;

    if cli.json {
        println!("{}", render::format_json(&config, &outcome)?);
    } else {
        print!("{}", render::format_transcript(&config, &outcome));
    }

    Ok(())
}
