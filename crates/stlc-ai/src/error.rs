//! Error types for the analysis provider

/// Errors produced by analysis providers
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No remote endpoint is configured
    #[error("no analysis endpoint configured")]
    MissingConfig,

    /// The HTTP request itself failed
    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("analysis endpoint error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered, but not with the JSON shape asked for
    #[error("analysis response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint answered with no content at all
    #[error("analysis response contained no content")]
    EmptyResponse,

    /// The call exceeded its deadline
    #[error("analysis call timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AiError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "analysis endpoint error (429): rate limited"
        );
        let err = AiError::Timeout(std::time::Duration::from_secs(60));
        assert!(err.to_string().contains("timed out"));
    }
}
