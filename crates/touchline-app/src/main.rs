// Touchline entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (writing defaults on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Open the session store
// 5. Run the command

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use touchline_app::cli::Cli;
use touchline_app::commands::{self, AppContext};
use touchline_app::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let data_dir = config::default_data_dir().context("failed to locate data directory")?;

    init_tracing(&data_dir, cli.verbose)?;
    info!(api = %config.api.base_url, "touchline starting");

    let ctx = AppContext::open(config, &data_dir).context("failed to open session")?;
    let result = commands::dispatch(&ctx, cli.command).await;
    if let Err(e) = &result {
        error!("command failed: {e:#}");
    }
    result
}

fn init_tracing(data_dir: &Path, verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("touchline.log"))
        .context("failed to open log file")?;

    let filter = if verbose {
        EnvFilter::new("touchline=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("touchline=info,warn"))
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
