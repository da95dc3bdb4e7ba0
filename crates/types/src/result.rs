use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response document of a successful validation call.
///
/// The document is stored as received. Accessors look up fields by name and return `None`
/// when a field is missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult(Value);

impl ValidationResult {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Per-claim records.
    ///
    /// Reads the `dispositions` array when present and falls back to `claims`.
    pub fn claims(&self) -> impl Iterator<Item = ClaimView<'_>> {
        self.records().iter().map(ClaimView::new)
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.0.get("overall_score").and_then(Value::as_f64)
    }

    pub fn total_claims(&self) -> Option<u64> {
        self.0.get("total_claims").and_then(Value::as_u64)
    }

    pub fn supported_count(&self) -> Option<u64> {
        self.0.get("supported_count").and_then(Value::as_u64)
    }

    pub fn refuted_count(&self) -> Option<u64> {
        self.0.get("refuted_count").and_then(Value::as_u64)
    }

    pub fn insufficient_count(&self) -> Option<u64> {
        self.0.get("insufficient_count").and_then(Value::as_u64)
    }

    pub fn support_rate(&self) -> Option<f64> {
        self.0.get("support_rate").and_then(Value::as_f64)
    }

    fn records(&self) -> &[Value] {
        ["dispositions", "claims"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Read-only view over one claim record.
#[derive(Debug, Clone, Copy)]
pub struct ClaimView<'a> {
    record: &'a Value,
}

impl<'a> ClaimView<'a> {
    pub fn new(record: &'a Value) -> Self {
        Self { record }
    }

    /// Claim text, from `claim_text` or `text`.
    pub fn text(&self) -> Option<&'a str> {
        self.str_field("claim_text").or_else(|| self.str_field("text"))
    }

    /// Raw `score` value. Rendering classifies it, so no numeric coercion happens here.
    pub fn score_value(&self) -> Option<&'a Value> {
        self.record.get("score")
    }

    pub fn score(&self) -> Option<f64> {
        self.score_value().and_then(Value::as_f64)
    }

    pub fn verdict(&self) -> Option<&'a str> {
        self.str_field("verdict")
    }

    pub fn field(&self) -> Option<&'a str> {
        self.str_field("field")
    }

    pub fn quality_score(&self) -> Option<f64> {
        self.record.get("quality_score").and_then(Value::as_f64)
    }

    pub fn explanation(&self) -> Option<&'a str> {
        self.str_field("explanation")
    }

    /// Text of each evidence span, in the order the service ranked them.
    pub fn evidence(&self) -> impl Iterator<Item = &'a str> {
        self.record
            .get("evidence")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter_map(|span| span.get("text").and_then(Value::as_str))
    }

    /// `detail` of each quality issue.
    pub fn quality_issues(&self) -> impl Iterator<Item = &'a str> {
        self.record
            .get("quality_issues")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter_map(|issue| issue.get("detail").and_then(Value::as_str))
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.record.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claims_read_from_dispositions() {
        let result = ValidationResult::new(json!({
            "overall_score": 0.5,
            "total_claims": 2,
            "supported_count": 1,
            "refuted_count": 1,
            "insufficient_count": 0,
            "support_rate": 0.5,
            "dispositions": [
                {
                    "field": "revenue",
                    "claim_text": "Revenue grew 15%.",
                    "verdict": "refuted",
                    "score": 0.2,
                    "quality_score": 0.9,
                    "explanation": "Source says 12%.",
                    "evidence": [
                        { "text": "revenue grew by 12%", "score": 0.91 },
                        { "score": 0.3 }
                    ],
                    "quality_issues": [
                        { "type": "vague", "severity": "low", "detail": "No period given" }
                    ]
                },
                { "field": "hires", "claim_text": "Hired 25 people.", "verdict": "supported" }
            ]
        }));

        let claims: Vec<_> = result.claims().collect();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].text(), Some("Revenue grew 15%."));
        assert_eq!(claims[0].field(), Some("revenue"));
        assert_eq!(claims[0].verdict(), Some("refuted"));
        assert_eq!(claims[0].score(), Some(0.2));
        assert_eq!(claims[0].quality_score(), Some(0.9));
        assert_eq!(claims[0].explanation(), Some("Source says 12%."));
        assert_eq!(claims[0].evidence().collect::<Vec<_>>(), vec!["revenue grew by 12%"]);
        assert_eq!(claims[0].quality_issues().collect::<Vec<_>>(), vec!["No period given"]);
        assert_eq!(claims[1].explanation(), None);
        assert_eq!(claims[1].evidence().count(), 0);
        assert_eq!(claims[1].score(), None);

        assert_eq!(result.overall_score(), Some(0.5));
        assert_eq!(result.total_claims(), Some(2));
        assert_eq!(result.supported_count(), Some(1));
        assert_eq!(result.refuted_count(), Some(1));
        assert_eq!(result.insufficient_count(), Some(0));
        assert_eq!(result.support_rate(), Some(0.5));
    }

    #[test]
    fn test_claims_fall_back_to_claims_array() {
        let result = ValidationResult::new(json!({
            "claims": [{ "text": "Revenue grew 15%.", "score": 0.2 }]
        }));

        let claims: Vec<_> = result.claims().collect();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text(), Some("Revenue grew 15%."));
        assert_eq!(claims[0].score(), Some(0.2));
    }

    #[test]
    fn test_unexpected_shapes_yield_nothing() {
        let result =
            ValidationResult::new(json!({ "dispositions": "n/a", "overall_score": "high" }));
        assert_eq!(result.claims().count(), 0);
        assert_eq!(result.overall_score(), None);

        let scalar = ValidationResult::new(json!(42));
        assert_eq!(scalar.claims().count(), 0);
    }

    #[test]
    fn test_document_round_trips_untouched() {
        let doc = json!({ "claims": [], "extra": { "nested": true } });
        let result: ValidationResult = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(result.as_value(), &doc);
        assert_eq!(serde_json::to_value(&result).unwrap(), doc);
    }
}
