use anyhow::Context;
use clap::Parser;
use emotion_classifiers::EmotionClassifier;
use emotion_dashboard::telemetry::init_metrics;
use emotion_dashboard::{run_server, Cli, DashboardConfig, DashboardState, SimulatedNotifier};
use emotion_store::PredictionStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = DashboardConfig::load(&cli.config, &cli)?;
    let addr = config.socket_addr()?;

    let classifier = EmotionClassifier::load(&config.models_dir).with_context(|| {
        format!(
            "failed to load the artifact pair from {:?}; run `emotion-train --output {}` first",
            config.models_dir,
            config.models_dir.display()
        )
    })?;
    let store = PredictionStore::open(&config.database_path)?;
    let metrics_handle = init_metrics()?;

    println!();
    println!("  AI Emotion Classifier");
    println!();
    println!("  Models:   {}", config.models_dir.display());
    println!("  Database: {}", config.database_path.display());
    println!("  Report:   {}", config.report_path.display());
    println!();
    println!("  Open http://{} in your browser", addr);
    println!();

    let state = DashboardState::new(
        config,
        Arc::new(classifier),
        store,
        Arc::new(SimulatedNotifier),
        metrics_handle,
    )?;
    info!("Application state initialized");

    run_server(state, addr).await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "emotion_dashboard=debug,emotion_store=debug,emotion_classifiers=debug,tower_http=debug"
    } else {
        "emotion_dashboard=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
