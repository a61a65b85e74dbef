//! Error taxonomy for the dashboard engine
//!
//! Parse and fetch failures never escape the engine: they are logged and the
//! affected slot keeps its previous text. The types exist so every component
//! boundary still returns an explicit `Result`.

use thiserror::Error;

/// Failure to decode a payload from the data endpoint or an external service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{kind} payload has {found} fields, expected {expected}")]
    FieldCountMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid time of day: \"{0}\"")]
    InvalidTimeOfDay(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

/// Failure to obtain a payload over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<ParseError> for FetchError {
    fn from(e: ParseError) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Sunrise/sunset or the current time are not known yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Classification deferred until sunrise, sunset and time are known")]
pub struct ClassificationDeferred;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_mismatch_display() {
        let e = ParseError::FieldCountMismatch {
            kind: "uptime",
            expected: 3,
            found: 2,
        };
        assert_eq!(e.to_string(), "uptime payload has 2 fields, expected 3");
    }

    #[test]
    fn status_error_display() {
        let e = FetchError::Status {
            status: 503,
            url: "http://localhost/ajax".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 503 from http://localhost/ajax");
    }

    #[test]
    fn parse_error_converts_to_decode() {
        let e: FetchError = ParseError::InvalidJson("eof".to_string()).into();
        assert_eq!(e, FetchError::Decode("Invalid JSON: eof".to_string()));
    }
}
