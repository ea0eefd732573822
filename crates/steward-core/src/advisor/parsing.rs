//! Tolerant parsing of advisor responses
//!
//! Model replies usually wrap the JSON payload in prose ("Here is the
//! analysis you asked for: { ... } Let me know if..."). These helpers pull
//! out the outermost JSON object and deserialize it into a partial result
//! type. Missing sections become default fields; a reply with no JSON at
//! all yields `None` and the caller falls back to a payload carrying the
//! raw text.

use serde::de::DeserializeOwned;
use tracing::debug;

/// Extract the outermost `{ ... }` span from a free-text reply.
pub fn extract_json(response: &str) -> Option<&str> {
    let response = response.trim();
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if start < end {
        Some(&response[start..=end])
    } else {
        None
    }
}

/// Best-effort parse of a model reply into a partial result type.
///
/// Returns `None` when no JSON object can be found or the payload does not
/// deserialize; never errors.
pub fn parse_partial<T: DeserializeOwned>(response: &str) -> Option<T> {
    let json_str = extract_json(response)?;
    match serde_json::from_str(json_str) {
        Ok(value) => Some(value),
        Err(e) => {
            let truncated = if json_str.len() > 200 {
                &json_str[..200]
            } else {
                json_str
            };
            debug!(error = %e, payload = truncated, "Advisor reply JSON did not deserialize");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::types::{HealthAssessment, PurchaseAdvice, SentimentAnalysis};

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let reply = r#"Sure! Here is the assessment:

        {"overallScore": 72, "category": "Stable", "strengths": ["good savings rate"]}

        Hope this helps."#;

        let parsed: HealthAssessment = parse_partial(reply).unwrap();
        assert_eq!(parsed.overall_score, Some(72.0));
        assert_eq!(parsed.category.as_deref(), Some("Stable"));
        assert_eq!(parsed.strengths, vec!["good savings rate"]);
        // Missing sections fall back to defaults
        assert!(parsed.weaknesses.is_empty());
        assert!(parsed.component_scores.savings.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let parsed: PurchaseAdvice = parse_partial(r#"{"recommendation": "caution"}"#).unwrap();
        assert_eq!(parsed.recommendation.as_deref(), Some("caution"));
        assert!(parsed.confidence.is_none());
        assert!(parsed.alternatives.is_empty());
    }

    #[test]
    fn no_json_yields_none() {
        assert!(parse_partial::<PurchaseAdvice>("I cannot answer that.").is_none());
        assert!(parse_partial::<PurchaseAdvice>("").is_none());
        // A lone closing brace before an opening one is not a JSON span
        assert!(parse_partial::<PurchaseAdvice>("} nothing {").is_none());
    }

    #[test]
    fn raw_fallback_keeps_text() {
        let reply = "Markets reacted calmly to the announcement.";
        let parsed = parse_partial::<SentimentAnalysis>(reply)
            .unwrap_or_else(|| SentimentAnalysis::from_raw(reply));
        assert_eq!(parsed.summary.as_deref(), Some(reply));
        assert!(parsed.sentiment_score.is_none());
    }
}
