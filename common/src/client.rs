//! The seam between the request controller and whatever performs the HTTP
//! call. The browser implementation lives in the frontend crate; tests use
//! in-memory fakes.

use async_trait::async_trait;

use crate::identifier::ResourceIdentifier;
use crate::lifecycle::token::CancelSignal;
use crate::model::roast::RoastResponse;

/// Shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch data. Check console for details.";

/// Why a roast request did not produce a [`RoastResponse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    /// The attempt was cancelled. Expected, never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    /// The health probe failed before the roast request was sent.
    #[error("Cannot connect to backend at {base_url}. Is the server running?")]
    Unreachable { base_url: String },

    /// Transport-level failure (DNS, CORS, connection reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// A 2xx body that is not a valid roast response.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl RequestFailure {
    /// Builds a [`RequestFailure::Status`] from a status code and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            detail: crate::requests::ErrorDetail::message_from_body(body),
        }
    }

    /// A [`RequestFailure::Network`] for a request that hit its deadline.
    /// Deadlines under one second are reported in milliseconds.
    pub fn timed_out(timeout_ms: u32) -> Self {
        let elapsed = if timeout_ms < 1000 {
            format!("{timeout_ms} ms")
        } else {
            let seconds = timeout_ms.div_ceil(1000);
            format!("{seconds} second{}", if seconds == 1 { "" } else { "s" })
        };
        Self::Network(format!("Request timed out after {elapsed}"))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The message projected into the error state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Status { status, detail: None } => {
                format!("Request failed with status {status}")
            }
            Self::Unreachable { .. } => self.to_string(),
            Self::Network(message) | Self::Decode(message) if !message.trim().is_empty() => {
                message.clone()
            }
            Self::Network(_) | Self::Decode(_) | Self::Cancelled => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Fetches a profile and its roast for one username.
///
/// Implementations should stop work when `signal` fires, if the transport
/// supports it, and may then return [`RequestFailure::Cancelled`]. The
/// controller discards the outcome of a cancelled attempt either way.
#[async_trait(?Send)]
pub trait RoastApi {
    async fn fetch_roast(
        &self,
        identifier: &ResourceIdentifier,
        signal: &CancelSignal,
    ) -> Result<RoastResponse, RequestFailure>;
}

#[cfg(test)]
mod test {
    use super::{RequestFailure, GENERIC_FAILURE_MESSAGE};

    #[test]
    fn test_detail_wins() {
        let failure = RequestFailure::from_status(404, r#"{"detail":"user not found"}"#);
        assert_eq!(failure.user_message(), "user not found");
    }

    #[test]
    fn test_status_fallback() {
        let failure = RequestFailure::from_status(502, "Bad Gateway");
        assert_eq!(failure.user_message(), "Request failed with status 502");
    }

    #[test]
    fn test_unreachable_message() {
        let failure = RequestFailure::Unreachable {
            base_url: "http://127.0.0.1:8000".to_string(),
        };
        assert_eq!(
            failure.user_message(),
            "Cannot connect to backend at http://127.0.0.1:8000. Is the server running?"
        );
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(
            RequestFailure::Network(String::new()).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            RequestFailure::Network("connection refused".to_string()).user_message(),
            "connection refused"
        );
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            RequestFailure::timed_out(30_000).user_message(),
            "Request timed out after 30 seconds"
        );
        assert_eq!(
            RequestFailure::timed_out(1500).user_message(),
            "Request timed out after 2 seconds"
        );
        assert_eq!(
            RequestFailure::timed_out(1000).user_message(),
            "Request timed out after 1 second"
        );
        assert_eq!(
            RequestFailure::timed_out(250).user_message(),
            "Request timed out after 250 ms"
        );
    }
}
