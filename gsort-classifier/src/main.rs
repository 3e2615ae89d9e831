//! gsort-classifier - genre classification CLI
//!
//! Classifies JSON batches of track metadata (plus optional provider
//! responses) and summarises classification results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gsort_classifier::batch::{load_results, load_tracks, write_results};
use gsort_classifier::{genre_statistics, BatchClassifier, ClassifierConfig, GenreClassifier, Taxonomy};
use gsort_common::logging::{init_tracing, log_level_override, DEFAULT_LOG_LEVEL};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "gsort-classifier", version, about = "Electronic music genre classifier")]
struct Cli {
    /// Config file (overrides GSORT_CONFIG and the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (overrides GSORT_LOG_LEVEL and the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a JSON array of {metadata, provider} records
    Classify {
        input: PathBuf,
        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarise a JSON array of classification results
    Stats { input: PathBuf },
    /// List taxonomy genres and their folder names
    Taxonomy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing first, so config resolution is logged
    let level_override = cli.log_level.clone().or_else(log_level_override);
    let log_handle = init_tracing(level_override.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting gsort-classifier");

    let config = ClassifierConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if level_override.is_none() {
        if let Err(e) = log_handle.set_level(&config.logging.level) {
            warn!(error = %e, "Configured log level not applied");
        }
    }

    match cli.command {
        Command::Classify { input, output } => {
            let tracks = load_tracks(&input)?;
            let classifier = Arc::new(GenreClassifier::from_config(Taxonomy::builtin(), &config));
            let batch = BatchClassifier::new(classifier, config.batch.max_parallel);
            let results = batch.classify_all(tracks).await;

            match output {
                Some(path) => {
                    write_results(&path, &results)?;
                    info!(path = %path.display(), results = results.len(), "Results written");
                }
                None => println!("{}", serde_json::to_string_pretty(&results)?),
            }
        }
        Command::Stats { input } => {
            let results = load_results(&input)?;
            let stats = genre_statistics(&results, &config.statistics);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Taxonomy => {
            let taxonomy = Taxonomy::builtin();
            for genre in taxonomy.genres() {
                println!("{}\t{}", genre.id, taxonomy.folder_name(&genre.id));
            }
        }
    }

    Ok(())
}
