// Command-line surface: one positional log file and a required `--webhook`.

use clap::Parser;
use std::path::PathBuf;

/// Upload a log file for AI analysis with MITRE ATT&CK mapping.
#[derive(Parser, Debug, Clone)]
#[command(name = "log-upload", version, about)]
pub struct Cli {
    /// Path to the log file to analyze
    pub log_file: PathBuf,

    /// URL of the analysis webhook
    #[arg(long)]
    pub webhook: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_webhook() {
        let cli = Cli::try_parse_from([
            "log-upload",
            "auth.log",
            "--webhook",
            "http://localhost:5678/webhook/logs",
        ])
        .expect("parse success");
        assert_eq!(cli.log_file, PathBuf::from("auth.log"));
        assert_eq!(cli.webhook, "http://localhost:5678/webhook/logs");
    }

    #[test]
    fn webhook_is_required() {
        let result = Cli::try_parse_from(["log-upload", "auth.log"]);
        assert!(result.is_err());
    }

    #[test]
    fn log_file_is_required() {
        let result = Cli::try_parse_from(["log-upload", "--webhook", "http://localhost/hook"]);
        assert!(result.is_err());
    }
}
