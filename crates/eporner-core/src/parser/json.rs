//! JSON body decoder

use serde_json::Value;

use super::node::Node;
use crate::error::{EpornerError, Result};

/// Decodes a JSON document into a [`Node`]
///
/// # Errors
/// Returns `Parse` with the decoder diagnostic if the document is malformed
pub fn decode_json(body: &str) -> Result<Node> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EpornerError::Parse(format!("Failed to parse JSON response: {}", e)))?;
    Ok(Node::from_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let node = decode_json(r#"{"count": 2, "page": "1"}"#).unwrap();
        assert_eq!(node.field("count"), Some("2"));
        assert_eq!(node.field("page"), Some("1"));
    }

    #[test]
    fn test_decode_null_document_is_empty() {
        assert!(decode_json("null").unwrap().is_empty());
        assert!(decode_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = decode_json(r#"{"count": "#).unwrap_err();
        match err {
            EpornerError::Parse(msg) => assert!(msg.starts_with("Failed to parse JSON response:")),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
