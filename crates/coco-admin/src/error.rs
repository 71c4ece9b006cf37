//! Errors raised by the admin client.

use serde::Deserialize;
use thiserror::Error;

/// Exception details carried in a platform response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformException {
    /// HTTP code the platform associated with the failure.
    #[serde(rename = "relatedHTTPCode")]
    pub related_http_code: u16,
    /// Java exception class raised inside the platform.
    #[serde(default)]
    pub exception_class_name: Option<String>,
    /// Message identifier, for example `OMAG-ADMIN-400-001`.
    #[serde(default)]
    pub exception_error_message_id: Option<String>,
    /// Formatted error message.
    #[serde(default)]
    pub exception_error_message: Option<String>,
    /// What the platform did in response.
    #[serde(default)]
    pub exception_system_action: Option<String>,
    /// What the caller should do next.
    #[serde(default)]
    pub exception_user_action: Option<String>,
}

impl PlatformException {
    /// Best available one-line summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.exception_error_message
            .as_deref()
            .or(self.exception_class_name.as_deref())
            .unwrap_or("no exception message supplied")
    }
}

/// Errors surfaced by [`crate::PlatformAdmin`] implementations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A platform URL could not be parsed or extended.
    #[error("invalid platform URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Building the HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request never produced a response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint that was called.
        endpoint: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The platform answered with a non-success status and no envelope.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The platform reported an exception in its response envelope.
    #[error("platform rejected {endpoint}: {}", .exception.summary())]
    Platform {
        /// Endpoint that was called.
        endpoint: String,
        /// Decoded exception details.
        exception: Box<PlatformException>,
    },
    /// A response body could not be decoded.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint that was called.
        endpoint: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// A request body could not be encoded.
    #[error("failed to encode {operation} request: {source}")]
    Encode {
        /// Operation being encoded.
        operation: &'static str,
        /// Serialiser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The session was used after `close_session`.
    #[error("admin session for {server} has been closed")]
    SessionClosed {
        /// Server the session was opened for.
        server: String,
    },
}
