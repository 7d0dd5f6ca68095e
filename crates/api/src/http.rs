//! Transport-neutral request and response types.
//!
//! The host's router parses the URL and query string; plugins only see the
//! route path and the decoded query arguments.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// Content type of every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A GET request routed to a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Route path relative to the plugin mount point (e.g. `/tags`)
    pub path: String,
    /// Decoded query arguments
    pub args: BTreeMap<String, String>,
}

impl Request {
    /// Request for `path` with no arguments
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: BTreeMap::new(),
        }
    }

    /// Add a query argument
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Look up a query argument
    pub fn query(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}

/// Response handed back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Value of the Content-Type header
    pub content_type: &'static str,
    /// Encoded body
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    /// JSON response with the given status
    ///
    /// Falls back to a 500 if the value cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: JSON_CONTENT_TYPE,
                body,
            },
            Err(e) => {
                error!(target: "textboard::api", error = %e, "Failed to encode JSON response");
                Self::error(500, "failed to encode response")
            }
        }
    }

    /// JSON error body `{"error": message}`
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&ErrorBody { error: message })
            .unwrap_or_else(|_| b"{\"error\":\"internal error\"}".to_vec());
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}
