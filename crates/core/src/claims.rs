//! Claims input normalisation.
//!
//! The claims field accepts either a JSON document or a plain paragraph. Whatever parses as
//! JSON is sent verbatim; anything else is trimmed and wrapped as `{ "body": ... }`.

use serde_json::Value;
use sourcecheck_types::ClaimsPayload;

/// Convert raw claims input into the payload sent to the service.
///
/// This never fails: text that is not JSON is a supported input, not an error.
pub fn normalize_claims(input: &str) -> ClaimsPayload {
    match serde_json::from_str::<Value>(input) {
        Ok(document) => ClaimsPayload::Structured(document),
        Err(e) => {
            tracing::debug!("claims input is not JSON ({}), sending as plain text", e);
            ClaimsPayload::Body {
                body: input.trim().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_is_passed_through() {
        let payload = normalize_claims(r#"{"body":"Revenue grew 15%."}"#);
        assert_eq!(
            payload,
            ClaimsPayload::Structured(json!({ "body": "Revenue grew 15%." }))
        );
    }

    #[test]
    fn test_any_json_shape_is_passed_through() {
        assert_eq!(
            normalize_claims(r#" [{"field":"hpi","text":"Chest pain"}] "#),
            ClaimsPayload::Structured(json!([{ "field": "hpi", "text": "Chest pain" }]))
        );
        assert_eq!(normalize_claims("42"), ClaimsPayload::Structured(json!(42)));
        assert_eq!(
            normalize_claims(r#""quoted""#),
            ClaimsPayload::Structured(json!("quoted"))
        );
    }

    #[test]
    fn test_plain_text_is_wrapped_and_trimmed() {
        assert_eq!(
            normalize_claims("  hello world\n"),
            ClaimsPayload::Body {
                body: "hello world".into()
            }
        );
    }

    #[test]
    fn test_malformed_json_falls_back_to_text() {
        assert_eq!(
            normalize_claims(r#"{"body": "unterminated"#),
            ClaimsPayload::Body {
                body: r#"{"body": "unterminated"#.into()
            }
        );
    }

    #[test]
    fn test_empty_input_falls_back_to_empty_body() {
        assert_eq!(
            normalize_claims("   "),
            ClaimsPayload::Body {
                body: String::new()
            }
        );
    }
}
