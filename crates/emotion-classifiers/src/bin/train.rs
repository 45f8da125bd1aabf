//! Offline trainer for the emotion classifier artifact pair.
//!
//! Fits the vectorizer and classifier and writes them next to each other so
//! the dashboard can load them at startup.

use anyhow::Result;
use clap::Parser;
use emotion_classifiers::training;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "emotion-train")]
#[command(about = "Train the emotion classifier artifact pair", long_about = None)]
struct Cli {
    /// Output directory for the artifact pair
    #[arg(short, long, default_value = "models", env = "EMOTION_MODELS_DIR")]
    output: PathBuf,

    /// CSV dataset with `text` and `label` columns (reference sentences if omitted)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let samples = match &cli.dataset {
        Some(path) => training::load_dataset(path)?,
        None => training::reference_dataset(),
    };

    let pair = training::fit(&samples)?;
    let (vectorizer_path, classifier_path) = pair.save(&cli.output)?;

    println!(
        "Model and vectorizer saved as '{}' and '{}'",
        classifier_path.display(),
        vectorizer_path.display()
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("emotion_classifiers=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("emotion_classifiers=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
