//! Error types for the exporter

/// Export failures
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The payload could not be serialized
    #[error("export serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The requested format does not exist for this data kind
    #[error("{kind} cannot be exported as {format}")]
    Unsupported {
        kind: &'static str,
        format: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_display() {
        let err = ExportError::Unsupported {
            kind: "test plan",
            format: "csv",
        };
        assert_eq!(err.to_string(), "test plan cannot be exported as csv");
    }
}
