//! tonewav - writes a sine tone to a canonical 16-bit PCM WAV file.
//!
//! Settings come from the JSON file named by `TONEWAV_CONFIG`, else
//! `tonewav.json` in the working directory, else built-in defaults.
//! Log verbosity follows `RUST_LOG` (default `info`).

mod settings;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use tonewav::{generate_to_path, FileSink};

use settings::{Settings, CONFIG_ENV};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
    let cwd = env::current_dir().context("Failed to resolve working directory")?;

    let (settings, source) = Settings::discover(explicit.as_deref(), &cwd)?;
    match &source {
        Some(path) => tracing::info!(config = %path.display(), "loaded settings"),
        None => tracing::info!("using default settings"),
    }

    let summary = generate_to_path(&settings.request, &mut FileSink::new(), &settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    println!(
        "{} {} ({} bytes, {} samples, pcm {})",
        "wrote".green().bold(),
        summary.path.display(),
        summary.bytes_written,
        summary.num_samples,
        summary.pcm_hash.dimmed()
    );

    Ok(())
}
