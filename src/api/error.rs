//! API Error Taxonomy
//!
//! Every remote call resolves to one of these. Errors are handled at the
//! call site: logged, then surfaced as an inline message or toast. Nothing
//! propagates to a global handler.

/// Failure modes of a remote call or user-driven flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Fetch rejected or the server answered with a non-2xx status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the JSON shape we expected.
    #[error("parse error: {0}")]
    Parse(String),

    /// A confirmation dialog was declined or the challenge text did not
    /// match. Applies to account deletion only.
    #[error("cancelled by user")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_short_and_human_readable() {
        let err = ApiError::Network("HTTP 503".to_string());
        assert_eq!(err.to_string(), "network error: HTTP 503");

        let err = ApiError::Parse("missing field `balance`".to_string());
        assert_eq!(err.to_string(), "parse error: missing field `balance`");

        assert_eq!(ApiError::Cancelled.to_string(), "cancelled by user");
    }
}
