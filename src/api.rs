// API client module: a small blocking HTTP client that posts a log file to
// the analysis webhook. One request per run, no retries and no timeout.

use crate::error::AnalysisError;
use crate::loader::LogPayload;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::debug;

/// Status and body text returned by the webhook, before any interpretation.
#[derive(Debug, Clone)]
pub struct WebhookReply {
    pub status: StatusCode,
    pub body: String,
}

/// Holds a reqwest blocking client and the webhook URL it posts to.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    /// Build a client for `url`. The blocking client would otherwise apply
    /// a 30 second default, so the timeout is switched off explicitly.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(WebhookClient {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the raw log text as `text/plain`. Only transport problems are
    /// errors here; a non-200 status is still a reply.
    pub fn post_log(&self, payload: &LogPayload) -> Result<WebhookReply, AnalysisError> {
        let res = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain")
            .header(CONTENT_LENGTH, payload.byte_len())
            .body(payload.text().to_owned())
            .send()?;
        let status = res.status();
        let body = res.text()?;
        debug!(status = status.as_u16(), body_len = body.len(), "webhook replied");
        Ok(WebhookReply { status, body })
    }
}
