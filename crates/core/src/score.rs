//! Score buckets for display.

use crate::constants::{HIGH_SCORE_THRESHOLD, MEDIUM_SCORE_THRESHOLD};
use serde::Serialize;
use serde_json::Value;

/// Display classification of a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Low,
    Medium,
    High,
}

impl ScoreBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Map a score to its bucket.
///
/// Absent, zero and NaN scores are `Low`. Otherwise `>= 0.7` is `High`, `>= 0.4` is `Medium`
/// and everything below is `Low`.
pub fn classify(score: Option<f64>) -> ScoreBucket {
    let Some(score) = score.filter(|s| *s != 0.0 && !s.is_nan()) else {
        return ScoreBucket::Low;
    };

    if score >= HIGH_SCORE_THRESHOLD {
        ScoreBucket::High
    } else if score >= MEDIUM_SCORE_THRESHOLD {
        ScoreBucket::Medium
    } else {
        ScoreBucket::Low
    }
}

/// Classify a raw JSON score as found in a result document.
///
/// Numbers and numeric strings are classified; every other value is `Low`.
pub fn classify_value(score: Option<&Value>) -> ScoreBucket {
    let score = match score {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_buckets() {
        assert_eq!(classify(Some(0.95)), ScoreBucket::High);
        assert_eq!(classify(Some(0.55)), ScoreBucket::Medium);
        assert_eq!(classify(Some(0.1)), ScoreBucket::Low);
        assert_eq!(classify(None), ScoreBucket::Low);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(Some(0.7)), ScoreBucket::High);
        assert_eq!(classify(Some(0.4)), ScoreBucket::Medium);
        assert_eq!(classify(Some(0.3999)), ScoreBucket::Low);
        assert_eq!(classify(Some(0.6999)), ScoreBucket::Medium);
    }

    #[test]
    fn test_falsy_and_out_of_range_scores() {
        assert_eq!(classify(Some(0.0)), ScoreBucket::Low);
        assert_eq!(classify(Some(f64::NAN)), ScoreBucket::Low);
        assert_eq!(classify(Some(-0.5)), ScoreBucket::Low);
        assert_eq!(classify(Some(1.5)), ScoreBucket::High);
    }

    #[test]
    fn test_monotonic_over_unit_interval() {
        let mut previous = ScoreBucket::Low;
        for step in 0..=1000 {
            let bucket = classify(Some(step as f64 / 1000.0));
            let rank = |b: ScoreBucket| b as u8;
            assert!(rank(bucket) >= rank(previous), "score {}", step);
            previous = bucket;
        }
    }

    #[test]
    fn test_classify_value() {
        assert_eq!(classify_value(Some(&json!(0.8))), ScoreBucket::High);
        assert_eq!(classify_value(Some(&json!("0.5"))), ScoreBucket::Medium);
        assert_eq!(classify_value(Some(&json!(null))), ScoreBucket::Low);
        assert_eq!(classify_value(Some(&json!(true))), ScoreBucket::Low);
        assert_eq!(classify_value(Some(&json!("n/a"))), ScoreBucket::Low);
        assert_eq!(classify_value(None), ScoreBucket::Low);
    }

    #[test]
    fn test_bucket_names() {
        assert_eq!(ScoreBucket::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_value(ScoreBucket::High).unwrap(), json!("high"));
    }
}
