use thiserror::Error;

/// Failure of a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Connection, TLS, redirect or body-decoding failure
    #[error("{0}")]
    Transport(String),

    /// The request did not complete within the configured timeout
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl FetchError {
    /// HTTP status of the failed response, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum ScanError {
    /// The target URL was missing or could not be parsed
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// A page fetch failed; no partial report is produced
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The whole scan exceeded its time budget
    #[error("scan of {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ScanError {
    pub fn invalid_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure happened before any network activity
    pub fn is_input_error(&self) -> bool {
        matches!(self, ScanError::InvalidUrl { .. })
    }
}

/// Errors from the optional report enhancement step.
///
/// These never leave the scanner: any of them makes it fall back to the
/// preliminary report.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("enhancement service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The model returned a report that breaks the report invariants
    #[error("enhanced report rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for EnhanceError {
    fn from(err: reqwest::Error) -> Self {
        EnhanceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for EnhanceError {
    fn from(err: serde_json::Error) -> Self {
        EnhanceError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_includes_status() {
        let err = ScanError::Fetch {
            url: "https://example.org".to_string(),
            source: FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.org: HTTP 404: Not Found"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ScanError::invalid_url("", "no URL provided").is_input_error());
        assert!(!ScanError::Client("tls".to_string()).is_input_error());
        assert_eq!(FetchError::Transport("reset".to_string()).status(), None);
    }
}
