use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{ListOptions, Pagination};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an empty {field}")]
    EmptyId { field: &'static str },

    #[error("response contains a non-integer amount: {value}")]
    InvalidAmount { value: String },
}

/// Decoded `{ success, messages, result, pagination }` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub success: bool,
    pub messages: Vec<String>,
    pub result: Option<T>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeJson<W> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    messages: Option<Vec<serde_json::Value>>,
    result: Option<W>,
    #[serde(default)]
    pagination: Option<PaginationJson>,
}

#[derive(Debug, Deserialize)]
struct PaginationJson {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
}

fn message_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

pub(super) fn decode_envelope<W, T>(
    json: &str,
    convert: impl Fn(W) -> Result<T, TransportError>,
) -> Result<Outcome<T>, TransportError>
where
    W: DeserializeOwned,
{
    let parsed: EnvelopeJson<W> = serde_json::from_str(json)?;
    Ok(Outcome {
        success: parsed.success.unwrap_or(true),
        messages: parsed
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(message_text)
            .collect(),
        result: parsed.result.map(convert).transpose()?,
        pagination: parsed.pagination.map(|it| Pagination {
            count: it.count.unwrap_or_default(),
            next: it.next.filter(|next| !next.is_empty()),
        }),
    })
}

/// Decode responses whose `result` carries nothing useful (deletes).
///
/// An empty body (`204 No Content`) counts as success.
pub fn decode_empty_response(json: &str) -> Result<Outcome<()>, TransportError> {
    if json.trim().is_empty() {
        return Ok(Outcome {
            success: true,
            messages: Vec::new(),
            result: Some(()),
            pagination: None,
        });
    }
    let mut outcome = decode_envelope(json, |_: serde::de::IgnoredAny| Ok(()))?;
    outcome.result = Some(());
    Ok(outcome)
}

#[derive(Debug, Deserialize)]
struct ErrorJson {
    #[serde(default)]
    error: Option<ErrorDetailJson>,
    #[serde(default)]
    messages: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetailJson {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// Best-effort extraction of a human-readable message from an HTTP error body.
pub fn decode_error_message(body: &str) -> Option<String> {
    let parsed: ErrorJson = serde_json::from_str(body).ok()?;
    let present = |text: &String| !text.trim().is_empty();
    parsed
        .error
        .and_then(|detail| {
            detail
                .message
                .filter(present)
                .or_else(|| detail.reason.filter(present))
        })
        .or_else(|| {
            parsed
                .messages
                .unwrap_or_default()
                .into_iter()
                .map(message_text)
                .find(present)
        })
}

pub fn encode_list_query(options: &ListOptions) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(limit) = options.limit {
        query.push(("limit".to_owned(), limit.to_string()));
    }
    if let Some(after) = options.after.as_deref().filter(|it| !it.trim().is_empty()) {
        query.push(("after".to_owned(), after.to_owned()));
    }
    query
}
