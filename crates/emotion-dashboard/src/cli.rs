use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emotion-dashboard")]
#[command(author, version, about = "AI emotion classifier dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "EMOTION_CONFIG", default_value = "dashboard.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short, long, env = "EMOTION_ADDRESS")]
    pub address: Option<String>,

    /// Listen port
    #[arg(short, long, env = "EMOTION_PORT")]
    pub port: Option<u16>,

    /// Directory holding the trained artifact pair
    #[arg(short, long, env = "EMOTION_MODELS_DIR")]
    pub models: Option<PathBuf>,

    /// SQLite prediction database
    #[arg(short, long, env = "EMOTION_DATABASE")]
    pub database: Option<PathBuf>,

    /// Where exported PDF reports are written
    #[arg(short, long, env = "EMOTION_REPORT")]
    pub report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
