//! On-disk text format shared by every backend.
//!
//! The document is written as pretty-printed JSON: two-space indentation,
//! keys in document order, non-ASCII characters left unescaped so the file
//! stays readable when repairing it by hand.

use oum_types::Document;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Serialize a document into its stored text form.
pub fn encode(document: &Document) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse stored text back into a document.
///
/// Anything that is not a JSON object (malformed text, invalid UTF-8, or a
/// well-formed non-object root) is reported as [`StoreError::Corrupted`].
pub fn decode(bytes: &[u8]) -> StoreResult<Document> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupted {
        reason: e.to_string(),
    })?;
    Document::from_value(value).map_err(|e| StoreError::Corrupted {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oum_types::{keys, Coordinate, NewLine};

    #[test]
    fn encode_is_indented_with_two_spaces() {
        let text = String::from_utf8(encode(&Document::new()).unwrap()).unwrap();
        assert_eq!(text, "{\n  \"lines\": [],\n  \"trafficLights\": []\n}");
    }

    #[test]
    fn encode_keeps_non_ascii_unescaped() {
        let mut doc = Document::new();
        doc.push_line(
            NewLine::new([Coordinate::new(1.0, 2.0)]).property(keys::NAME, "проспект Абая"),
        )
        .unwrap();
        let text = String::from_utf8(encode(&doc).unwrap()).unwrap();
        assert!(text.contains("проспект Абая"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn decode_roundtrips_encode() {
        let mut doc = Document::new();
        doc.push_traffic_light(Coordinate::new(76.5, 43.25)).unwrap();
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn decode_reports_parse_reason() {
        let err = decode(b"{\"lines\": [").unwrap_err();
        match &err {
            StoreError::Corrupted { reason } => assert!(reason.contains("EOF"), "{reason}"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("Corrupted data file: "));
    }

    #[test]
    fn decode_rejects_non_object_root() {
        let err = decode(b"[1, 2, 3]").unwrap_err();
        assert!(err.is_corrupted());
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(decode(&[0xff, 0xfe, b'{']).unwrap_err().is_corrupted());
    }
}
