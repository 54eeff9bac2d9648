//! JSON rendition: pretty-printed payload, date-stamped filename

use serde::Serialize;

use crate::document::{export_filename, Document};
use crate::error::ExportError;

/// Serialize any export payload as pretty JSON.
pub fn to_json_document<T: Serialize>(data: &T, prefix: &str) -> Result<Document, ExportError> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(Document {
        filename: export_filename(prefix, "json"),
        media_type: "application/json",
        bytes: json.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_round_trips() {
        let doc = to_json_document(&json!({"a": [1, 2, 3]}), "stlc-export").unwrap();
        assert_eq!(doc.media_type, "application/json");
        let value: serde_json::Value = serde_json::from_slice(&doc.bytes).unwrap();
        assert_eq!(value["a"][2], 3);
        // pretty printing, not a single line
        assert!(doc.as_text().contains('\n'));
    }
}
