//! The produced document value

use chrono::Utc;

/// A finished export: filename, media type and content bytes.
///
/// Pure data; delivery (file write, download, attachment) is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `{prefix}-{ISO-date}.{ext}`
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Content as UTF-8 text; all current formats are textual.
    #[must_use]
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Date-stamped export filename
#[must_use]
pub fn export_filename(prefix: &str, extension: &str) -> String {
    format!("{prefix}-{}.{extension}", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_iso_date() {
        let name = export_filename("test-cases", "csv");
        assert!(name.starts_with("test-cases-"));
        assert!(name.ends_with(".csv"));
        // prefix + dash + yyyy-mm-dd + .csv
        assert_eq!(name.len(), "test-cases-".len() + 10 + 4);
    }
}
