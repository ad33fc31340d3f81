//! Normalized HTTP response model.
//!
//! Every send produces one of these, whether the server answered or the
//! transport failed. A transport failure is represented as ordinary data
//! (status code 0) rather than an error, so callers treat failed and
//! successful requests uniformly.

use super::request::now_millis;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A captured HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code. `0` is the sentinel for "transport failure, no
    /// response received".
    pub status_code: u16,

    /// Status reason phrase, or `"Error"` for the transport-failure sentinel.
    pub status_text: String,

    /// Response headers. HTTP permits repeated headers, so each name maps to
    /// an ordered list of values.
    pub headers: HashMap<String, Vec<String>>,

    /// Response body decoded as text.
    pub body: String,

    /// Declared content type, or `text/plain` when the server sent none.
    pub content_type: String,

    /// Wall-clock round-trip time in milliseconds.
    pub response_time_ms: i64,

    /// Byte size of the captured body.
    pub response_size: u64,

    /// When the response was captured, epoch milliseconds.
    pub timestamp: i64,
}

impl HttpResponse {
    /// Creates a response with the given status, empty headers and body.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: HashMap::new(),
            body: String::new(),
            content_type: "text/plain".to_string(),
            response_time_ms: 0,
            response_size: 0,
            timestamp: now_millis(),
        }
    }

    /// Creates the transport-failure sentinel response.
    ///
    /// Status code 0, status text "Error", empty headers, and a body
    /// describing the failure.
    pub fn transport_failure(message: impl std::fmt::Display, elapsed_ms: i64) -> Self {
        Self {
            status_code: 0,
            status_text: "Error".to_string(),
            headers: HashMap::new(),
            body: format!("Error: {}", message),
            content_type: "text/plain".to_string(),
            response_time_ms: elapsed_ms,
            response_size: 0,
            timestamp: now_millis(),
        }
    }

    /// Whether the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Whether this is the transport-failure sentinel.
    pub fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }

    /// Human-readable body size, e.g. "532 bytes", "1.25 KB", "3.10 MB".
    pub fn formatted_size(&self) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = 1024.0 * 1024.0;
        let size = self.response_size;
        if size < 1024 {
            format!("{} bytes", size)
        } else if (size as f64) < MB {
            format!("{:.2} KB", size as f64 / KB)
        } else {
            format!("{:.2} MB", size as f64 / MB)
        }
    }

    /// Human-readable round-trip time, e.g. "240 ms" or "1.52 s".
    pub fn formatted_time(&self) -> String {
        if self.response_time_ms < 1000 {
            format!("{} ms", self.response_time_ms)
        } else {
            format!("{:.2} s", self.response_time_ms as f64 / 1000.0)
        }
    }
}
