// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the webhook client and hand
//   both to `ui::analyze_log_file`.
// - The report goes to stdout; tracing output goes to stderr.

use clap::Parser;
use log_upload_cli::{api::WebhookClient, cli::Cli, ui::analyze_log_file};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let client = WebhookClient::new(cli.webhook)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let success = analyze_log_file(&mut out, &client, &cli.log_file, Path::new("."));

    // The outcome is already on stdout; the exit status stays 0 either way.
    debug!(success, "run complete");
    Ok(())
}
