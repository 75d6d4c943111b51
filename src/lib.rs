// Library root
// -----------
// This crate exposes the pieces of the `log-upload` binary so they can be
// tested without a terminal or a real webhook.
//
// Module responsibilities:
// - `cli`: command-line arguments.
// - `loader`: reads the log file into a `LogPayload`.
// - `api`: posts the payload to the webhook with a blocking HTTP client.
// - `response`: interprets the webhook reply as an `AnalysisResult`.
// - `ui`: drives one run and renders results or failures to the console.
// - `error`: the `AnalysisError` taxonomy shared by all of the above.
pub mod api;
pub mod cli;
pub mod error;
pub mod loader;
pub mod response;
pub mod ui;

pub use error::AnalysisError;
