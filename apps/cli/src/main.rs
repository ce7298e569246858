mod args;
mod config;

use clap::Parser;
use reclaim_app::{AppState, RunOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = args::CliArgs::parse();
    let config = config::load(&args.config)?;
    let options = RunOptions {
        output_dir: args.output_dir,
        dry_run: args.dry_run,
    };

    let state = AppState::connect(&config).await?;
    let report = state.run(&options).await?;

    let deleted = report.deletion.as_ref().map(|d| d.deleted).unwrap_or(0);
    info!(
        backup = %report.backup.path.display(),
        unused = report.unused.len(),
        uploaded = report.upload.uploaded,
        archived = report.verification.found,
        deleted,
        "reclamation finished"
    );
    Ok(())
}
