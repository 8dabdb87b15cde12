mod config;
mod errors;
mod llm_client;
mod pipeline;
mod recommendation;
mod survey;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::recommendation::Recommender;

/// Career recommendations from survey responses.
#[derive(Parser, Debug)]
#[command(
    name = "recommender",
    version,
    about = "Generate learning and career recommendations from survey NDJSON"
)]
struct Cli {
    /// Path to responses NDJSON
    #[arg(long, value_name = "PATH")]
    file: PathBuf,

    /// Number of entries to use, in file order (0 reads every entry)
    #[arg(long, default_value_t = 1)]
    limit: usize,

    /// Explicit dotenv file; otherwise `.env` is looked up in the current
    /// directory, then next to the NDJSON file
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // Configuration first so RUST_LOG from a dotenv file reaches the filter
    let config = Config::load(cli.env_file.as_deref(), &env_search_dirs(&cli.file))?;

    // Logs go to stderr; stdout carries only the payload
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &config.env_file {
        Some(path) => info!("Loaded environment from {}", path.display()),
        None => info!("No .env file found; using process environment and defaults"),
    }

    let recommender = Recommender::from_config(&config);
    let payload = pipeline::run(&cli.file, cli.limit, &recommender).await?;

    println!("{}", serde_json::to_string(&payload)?);
    Ok(())
}

/// Current directory first, then the directory holding the NDJSON file.
fn env_search_dirs(file: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        dirs.push(parent.to_path_buf());
    }
    dirs
}
