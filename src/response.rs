// Response interpretation: turns a webhook reply into an `AnalysisResult`.
//
// The webhook may answer with an object, or with an array whose first item
// is the object (some workflow engines wrap every result in a list). The
// JSON shape is resolved once into a `ResponseShape` and everything after
// that works on a plain mapping.

use crate::api::WebhookReply;
use crate::error::AnalysisError;
use reqwest::StatusCode;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Printed in place of the text report when the webhook sent none.
pub const NO_TEXT_REPORT: &str = "No text report available";

/// Check the status and decode the body as JSON.
pub fn decode_reply(reply: &WebhookReply) -> Result<Value, AnalysisError> {
    if reply.status != StatusCode::OK {
        return Err(AnalysisError::UnexpectedStatus {
            status: reply.status,
            body: reply.body.clone(),
        });
    }
    serde_json::from_str(&reply.body).map_err(|source| AnalysisError::MalformedBody {
        body: reply.body.clone(),
        source,
    })
}

/// JSON type name as shown in diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Top-level shape of a decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    Mapping(Map<String, Value>),
    NonEmptyList(Vec<Value>),
    EmptyOrScalar(Value),
}

impl ResponseShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(map) => ResponseShape::Mapping(map),
            Value::Array(items) if !items.is_empty() => ResponseShape::NonEmptyList(items),
            other => ResponseShape::EmptyOrScalar(other),
        }
    }

    /// Type of the value that would be used as the effective result:
    /// the first element for a list, the value itself otherwise.
    pub fn effective_type(&self) -> &'static str {
        match self {
            ResponseShape::Mapping(_) => "object",
            ResponseShape::NonEmptyList(items) => items.first().map_or("array", json_type_name),
            ResponseShape::EmptyOrScalar(value) => json_type_name(value),
        }
    }

    /// Resolve the effective result, which must be a mapping.
    pub fn into_effective(self) -> Result<Map<String, Value>, AnalysisError> {
        let value = match self {
            ResponseShape::Mapping(map) => return Ok(map),
            ResponseShape::NonEmptyList(items) => {
                items.into_iter().next().unwrap_or(Value::Array(Vec::new()))
            }
            ResponseShape::EmptyOrScalar(value) => value,
        };
        match value {
            Value::Object(map) => Ok(map),
            other => Err(AnalysisError::UnexpectedShape {
                context: "response",
                kind: json_type_name(&other),
                value: other,
            }),
        }
    }
}

/// Counters reported by the analysis endpoint. Missing keys read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    #[serde(deserialize_with = "counter")]
    pub total_logs: i64,
    #[serde(deserialize_with = "counter")]
    pub abnormal_events: i64,
    #[serde(deserialize_with = "counter")]
    pub mitre_findings: i64,
    #[serde(deserialize_with = "counter")]
    pub error_count: i64,
    #[serde(deserialize_with = "counter")]
    pub warning_count: i64,
}

/// A counter is an integer, or a float with no fractional part (`5.0`),
/// which is how JavaScript-based workflow engines often emit numbers.
fn counter<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(number) => number,
        other => {
            return Err(D::Error::custom(format!(
                "invalid type: {}, expected an integer counter",
                json_type_name(other)
            )))
        }
    };
    if let Some(count) = number.as_i64() {
        return Ok(count);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| D::Error::custom(format!("invalid counter value: {number}")))
}

/// `reportText` may be absent (placeholder) but not `null`.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Decoded analysis result. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub report_html: String,
    #[serde(default, deserialize_with = "present_string")]
    pub report_text: Option<String>,
}

impl AnalysisResult {
    /// Extract the result from the effective mapping. `body` is the raw
    /// response text, kept for the failure excerpt.
    pub fn from_effective(map: Map<String, Value>, body: &str) -> Result<Self, AnalysisError> {
        let bad_summary = map
            .get("summary")
            .filter(|summary| !summary.is_object())
            .map(json_type_name);
        if let Some(kind) = bad_summary {
            return Err(AnalysisError::UnexpectedShape {
                context: "summary",
                kind,
                value: Value::Object(map),
            });
        }
        let result: AnalysisResult = serde_json::from_value(Value::Object(map)).map_err(|source| {
            AnalysisError::ExtractionFailure {
                body: body.to_owned(),
                source,
            }
        })?;
        debug!(summary = ?result.summary, html_len = result.report_html.len(), "extracted analysis result");
        Ok(result)
    }

    pub fn text_report(&self) -> &str {
        self.report_text.as_deref().unwrap_or(NO_TEXT_REPORT)
    }
}
