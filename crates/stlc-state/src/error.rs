//! Error types for the state store

/// State store errors (persistence boundary only; intent dispatch never
/// fails)
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Reading or writing the snapshot slot failed
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents could not be serialized or parsed
    #[error("snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StateError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(err.to_string().contains("snapshot io failed"));
    }
}
