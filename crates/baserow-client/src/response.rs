use baserow_core::{Error, Page, Row};
use serde::Deserialize;
use tracing::debug;

use std::fmt;

/// Body of a failed request.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

/// A row listing as returned on the wire. `next` and `previous` are URLs.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    count: u64,
    next: Option<String>,
    results: Vec<Row>,
}

impl RawPage {
    /// Converts the wire page to page numbers, relative to the `page` that
    /// was requested.
    pub(crate) fn into_page(self, page: Option<u32>) -> Page<Row> {
        let page = page.unwrap_or(1);
        Page {
            count: self.count,
            previous: (page > 1).then(|| page - 1),
            next: self.next.map(|_| page + 1),
            results: self.results,
        }
    }
}

/// A non-JSON error response.
#[derive(Debug)]
pub(crate) struct StatusError {
    code: u16,
    text: String,
}

impl std::error::Error for StatusError {}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP status {} {}", self.code, self.text)
    }
}

/// Converts an error status into an API error when the server explained
/// itself in JSON, or a transport error otherwise.
pub(crate) fn status_error(method: &str, path: &str, code: u16, response: ureq::Response) -> Error {
    if response.content_type() != "application/json" {
        return Error::transport(StatusError {
            code,
            text: response.status_text().to_string(),
        });
    }

    let body: ErrorBody = match response.into_json() {
        Ok(body) => body,
        Err(err) => return Error::transport(err),
    };
    debug!(method, path, code, error = ?body.error, detail = ?body.detail, "API error");
    api_error(body)
}

fn api_error(body: ErrorBody) -> Error {
    let detail = match body.detail {
        Some(serde_json::Value::String(detail)) => detail,
        // Validation errors carry a structured detail.
        Some(detail) if !detail.is_null() => detail.to_string(),
        _ => "???".to_string(),
    };
    Error::api(body.error.unwrap_or_else(|| "UNKNOWN".to_string()), detail)
}
