// UI layer: runs one analysis from file to console. All output goes
// through a `Write` handle so the binary can pass stdout and tests can pass
// a buffer. Failures never propagate past `analyze_log_file`; they are
// rendered by `report_failure` and turned into `false`.

use crate::api::WebhookClient;
use crate::error::AnalysisError;
use crate::loader;
use crate::response::{decode_reply, AnalysisResult, ResponseShape, Summary};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Characters of a non-JSON body shown in the failure message.
const MALFORMED_EXCERPT_CHARS: usize = 200;
/// Characters of the body shown when field extraction fails.
const EXTRACTION_EXCERPT_CHARS: usize = 500;

/// Load `log_file`, post it to the webhook and render the result to `out`.
/// The HTML report is written into `report_dir`. Returns whether the whole
/// run succeeded.
pub fn analyze_log_file<W: Write>(
    out: &mut W,
    client: &WebhookClient,
    log_file: &Path,
    report_dir: &Path,
) -> bool {
    match run(out, client, log_file, report_dir) {
        Ok(report) => {
            info!(report = %report.display(), "log analysis finished");
            true
        }
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "log analysis failed");
            if let Err(write_err) = report_failure(out, &err) {
                warn!(error = %write_err, "could not print failure report");
            }
            false
        }
    }
}

/// Path of the HTML report for `log_file`: `<stem>_analysis.html` in `report_dir`.
pub fn report_path(log_file: &Path, report_dir: &Path) -> PathBuf {
    let stem = log_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    report_dir.join(format!("{stem}_analysis.html"))
}

fn run<W: Write>(
    out: &mut W,
    client: &WebhookClient,
    log_file: &Path,
    report_dir: &Path,
) -> Result<PathBuf, AnalysisError> {
    let payload = loader::load(log_file)?;
    writeln!(
        out,
        "File size: {} bytes ({} characters)",
        payload.byte_len(),
        payload.char_count()
    )?;
    writeln!(out, "First 100 characters: {}", payload.preview())?;
    writeln!(out, "Sending to webhook: {}", client.url())?;

    let spinner = upload_spinner();
    let reply = client.post_log(&payload);
    spinner.finish_and_clear();
    let reply = reply?;
    writeln!(out, "Response status code: {}", reply.status.as_u16())?;

    let shape = ResponseShape::classify(decode_reply(&reply)?);
    writeln!(out, "Response type: {}", shape.effective_type())?;

    // The header goes out before the result is checked, so shape and
    // extraction failures are printed under it.
    print_summary_header(out)?;
    let result = AnalysisResult::from_effective(shape.into_effective()?, &reply.body)?;
    print_summary(out, &result.summary)?;

    let path = report_path(log_file, report_dir);
    std::fs::write(&path, &result.report_html).map_err(|source| AnalysisError::ReportWrite {
        path: path.clone(),
        source,
    })?;
    writeln!(out)?;
    writeln!(out, "Detailed HTML report saved to: {}", path.display())?;

    writeln!(out)?;
    writeln!(out, "=== Analysis Report ===")?;
    writeln!(out, "{}", result.text_report())?;
    Ok(path)
}

/// Spinner shown on stderr while the upload is in flight. indicatif hides
/// it when stderr is not a terminal.
fn upload_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("Uploading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn print_summary_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Log Analysis Summary ===")
}

/// Print the labeled counters that follow the summary header.
pub fn print_summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(out, "Total logs analyzed: {}", summary.total_logs)?;
    writeln!(out, "Abnormal events detected: {}", summary.abnormal_events)?;
    writeln!(out, "MITRE ATT&CK findings: {}", summary.mitre_findings)?;
    writeln!(out, "Error count: {}", summary.error_count)?;
    writeln!(out, "Warning count: {}", summary.warning_count)?;
    Ok(())
}

/// Render a failure with enough context (status, body excerpt, decoded
/// value) for a human to diagnose it.
pub fn report_failure<W: Write>(out: &mut W, err: &AnalysisError) -> std::io::Result<()> {
    match err {
        AnalysisError::InputNotFound { .. }
        | AnalysisError::InputUnreadable { .. }
        | AnalysisError::ReportWrite { .. } => writeln!(out, "Error: {err}"),
        AnalysisError::TransportFailure(_) => writeln!(out, "Error uploading log file: {err}"),
        AnalysisError::UnexpectedStatus { body, .. } => {
            writeln!(out, "Error: {err}")?;
            writeln!(out, "Response: {body}")
        }
        AnalysisError::MalformedBody { body, .. } => {
            writeln!(out, "Error: {err}")?;
            writeln!(
                out,
                "Response content: {}...",
                truncate_chars(body, MALFORMED_EXCERPT_CHARS)
            )
        }
        AnalysisError::UnexpectedShape { value, .. } => {
            writeln!(out, "{err}")?;
            writeln!(out, "Full response: {value}")
        }
        AnalysisError::ExtractionFailure { body, .. } => {
            writeln!(out, "Error processing response: {err}")?;
            writeln!(
                out,
                "Response: {}",
                truncate_chars(body, EXTRACTION_EXCERPT_CHARS)
            )
        }
        AnalysisError::Console(_) => writeln!(out, "Error: {err}"),
    }
}

/// First `max` characters of `text`, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
