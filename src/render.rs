//! Terminal rendering of validation outcomes.

use serde_json::Value;
use sourcecheck_core::{Phase, classify, classify_value};
use sourcecheck_types::ValidationResult;
use std::fmt::Write;

const MAX_EVIDENCE_SPANS: usize = 3;

pub fn phase_name(phase: &Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Success(_) => "success",
        Phase::Error(_) => "error",
    }
}

pub fn render_phase(phase: &Phase) -> String {
    match phase {
        Phase::Idle => "No validation has been run yet.\n".into(),
        Phase::Loading => "Validating...\n".into(),
        Phase::Success(result) => render_result(result),
        Phase::Error(message) => format!("Error: {message}\n"),
    }
}

/// Summary lines, then one line per claim (bucket, score, verdict, field) followed by the claim
/// text, explanation, quality and evidence indented below.
pub fn render_result(result: &ValidationResult) -> String {
    // Writing to a String cannot fail.
    let mut out = String::new();

    if let Some(score) = result.overall_score() {
        let _ = writeln!(out, "Overall score: {:.3} [{}]", score, classify(Some(score)));
    }
    if let (Some(total), Some(supported)) = (result.total_claims(), result.supported_count()) {
        let _ = write!(out, "Supported: {supported}/{total}");
        if let Some(rate) = result.support_rate() {
            let _ = write!(out, " ({:.0}%)", rate * 100.0);
        }
        if let Some(refuted) = result.refuted_count() {
            let _ = write!(out, ", refuted: {refuted}");
        }
        if let Some(insufficient) = result.insufficient_count() {
            let _ = write!(out, ", insufficient evidence: {insufficient}");
        }
        out.push('\n');
    }

    let mut count = 0;
    for (index, claim) in result.claims().enumerate() {
        count += 1;
        let bucket = classify_value(claim.score_value());
        let score = match claim.score_value() {
            Some(Value::Number(n)) => n
                .as_f64()
                .map_or_else(|| n.to_string(), |s| format!("{s:.2}")),
            Some(Value::String(s)) => s.clone(),
            _ => "-".into(),
        };

        let _ = write!(out, "{:>3}. [{:<6}] {:>5}", index + 1, bucket, score);
        if let Some(verdict) = claim.verdict() {
            let _ = write!(out, "  {verdict}");
        }
        if let Some(field) = claim.field() {
            let _ = write!(out, " ({field})");
        }
        out.push('\n');

        if let Some(text) = claim.text() {
            let _ = writeln!(out, "     {text}");
        }
        if let Some(explanation) = claim.explanation() {
            let _ = writeln!(out, "     why: {explanation}");
        }
        if let Some(quality) = claim.quality_score() {
            let _ = writeln!(out, "     quality: {quality:.2}");
        }
        for issue in claim.quality_issues() {
            let _ = writeln!(out, "     issue: {issue}");
        }
        for span in claim.evidence().take(MAX_EVIDENCE_SPANS) {
            let _ = writeln!(out, "     evidence: \"{span}\"");
        }
    }

    if count == 0 {
        out.push_str("No claim records in response.\n");
    }

    out
}
