// Shared fixtures for the webhook flow tests: a wiremock server running on
// its own tokio runtime (the code under test uses a blocking client, so the
// test thread itself must stay outside any runtime) and a scratch directory
// for log files and reports.

#![allow(dead_code)]

use log_upload_cli::api::WebhookClient;
use log_upload_cli::ui::analyze_log_file;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const HOOK_PATH: &str = "/webhook/log-analysis";

// `server` is declared before `runtime` so it is dropped first.
pub struct Harness {
    pub server: MockServer,
    pub runtime: Runtime,
    pub dir: TempDir,
}

/// Outcome of one `analyze_log_file` call.
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
}

impl Harness {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("Failed to build tokio runtime");
        let server = runtime.block_on(MockServer::start());
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        Harness {
            server,
            runtime,
            dir,
        }
    }

    /// Answer every POST to the hook path with `response`.
    pub fn respond_with(&self, response: ResponseTemplate) {
        self.runtime.block_on(
            Mock::given(method("POST"))
                .and(path(HOOK_PATH))
                .respond_with(response)
                .mount(&self.server),
        );
    }

    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.server.uri(), HOOK_PATH)
    }

    pub fn write_log(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write log file");
        path
    }

    pub fn report_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn run(&self, log_file: &Path) -> RunOutput {
        let client = WebhookClient::new(self.webhook_url()).expect("client");
        let mut out = Vec::new();
        let success = analyze_log_file(&mut out, &client, log_file, self.report_dir());
        RunOutput {
            success,
            stdout: String::from_utf8(out).expect("utf-8 output"),
        }
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}
