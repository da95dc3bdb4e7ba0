//! Schema and policies documents.
//!
//! Both are edited as YAML text and only parsed when a validation is submitted. JSON is a
//! subset of YAML, so either format is accepted.

use crate::{SourceCheckError, SourceCheckResult};
use serde_json::Value;

/// Parse the extraction schema text.
pub fn parse_schema(text: &str) -> SourceCheckResult<Value> {
    parse_document(text).map_err(SourceCheckError::SchemaParse)
}

/// Parse the scoring policies text.
pub fn parse_policies(text: &str) -> SourceCheckResult<Value> {
    parse_document(text).map_err(SourceCheckError::PoliciesParse)
}

// Blank text is an empty document, sent as null and left for the service to reject.
fn parse_document(text: &str) -> Result<Value, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_yaml_schema() {
        let text = "version: \"1.0\"\nfields:\n  revenue:\n    type: money\n    required: true\n";
        let schema = parse_schema(text).unwrap();
        assert_eq!(
            schema,
            json!({
                "version": "1.0",
                "fields": { "revenue": { "type": "money", "required": true } }
            })
        );
    }

    #[test]
    fn test_parse_json_policies() {
        let text = r#"{"version": "1.0", "validators": {"nli": {"threshold": 0.6}}}"#;
        let policies = parse_policies(text).unwrap();
        assert_eq!(policies["validators"]["nli"]["threshold"], json!(0.6));
    }

    #[test]
    fn test_blank_document_is_null() {
        assert_eq!(parse_schema("").unwrap(), Value::Null);
        assert_eq!(parse_policies("  \n ").unwrap(), Value::Null);
    }

    #[test]
    fn test_malformed_documents_name_their_source() {
        let err = parse_schema("fields: [unclosed").unwrap_err();
        assert!(matches!(err, SourceCheckError::SchemaParse(_)));
        assert!(err.to_string().starts_with("failed to parse schema"));

        let err = parse_policies("validators: {nli: 1").unwrap_err();
        assert!(matches!(err, SourceCheckError::PoliciesParse(_)));
    }
}
