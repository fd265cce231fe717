//! Unified error types for the venue-abstraction layer.

use thiserror::Error;

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Venue operation error.
    #[error("venue error: {0}")]
    Venue(#[from] VenueError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by venue operations.
///
/// Only the capital-gating operations (quote, list, buy) ever let these
/// reach the caller; the polled operations collapse them into safe
/// defaults and log instead.
#[derive(Error, Debug)]
pub enum VenueError {
    /// Transport failure: connection, DNS, timeout.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Venue answered with a non-success HTTP status.
    #[error("venue returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// Response arrived but its shape is structurally unusable.
    #[error("malformed venue response: {0}")]
    Malformed(String),

    /// Venue-reported business failure (explicit rejection).
    #[error("venue rejected request: {0}")]
    Rejected(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_error_display_is_descriptive() {
        let err = VenueError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "venue returned HTTP 503: maintenance");

        let err = VenueError::Malformed("missing order_id".to_string());
        assert!(err.to_string().contains("missing order_id"));
    }

    #[test]
    fn venue_error_converts_to_bridge_error() {
        let err: BridgeError = VenueError::Rejected("insufficient balance".to_string()).into();
        assert!(matches!(err, BridgeError::Venue(_)));
    }
}
