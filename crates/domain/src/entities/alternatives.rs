//! Safer-alternative suggestions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One suggested alternative product with its security rationale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeSuggestion {
    /// Alternative product name
    pub product_name: String,

    /// Vendor of the alternative
    pub vendor_name: String,

    /// Vendor website, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_website: Option<String>,

    /// Why this alternative has a stronger security posture
    pub why_safer: String,

    /// Specific security advantages
    #[serde(default)]
    pub security_highlights: Vec<String>,

    /// Functional differences from the assessed product
    #[serde(default)]
    pub key_differences: Vec<String>,

    /// Costs of switching (price, features, complexity)
    #[serde(default)]
    pub trade_offs: Vec<String>,

    /// Model confidence in the recommendation (0.0 - 1.0)
    pub confidence: f64,

    /// Certifications or other evidence backing the claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_basis: Option<String>,
}

/// The full alternatives recommendation for an assessed product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativesReport {
    /// Suggested alternatives, possibly empty
    #[serde(default)]
    pub alternatives: Vec<AlternativeSuggestion>,

    /// Overall confidence in the recommendation set (0.0 - 1.0)
    #[serde(default)]
    pub recommendation_confidence: f64,

    /// Overall reasoning for the recommendations
    #[serde(default)]
    pub rationale: String,

    /// Caveats or disclaimers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Product the suggestions were generated for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_product: Option<String>,

    /// When the suggestions were produced
    #[serde(default = "Utc::now")]
    pub suggested_at: DateTime<Utc>,

    /// Error message when this is a fallback report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AlternativesReport {
    /// Fallback used when the model call or response parse fails
    #[must_use]
    pub fn fallback(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            alternatives: Vec::new(),
            recommendation_confidence: 0.0,
            rationale: format!("Alternative suggestion failed: {error}"),
            note: Some("Unable to recommend alternatives at this time".to_string()),
            for_product: None,
            suggested_at: Utc::now(),
            error: Some(error),
        }
    }

    /// Clamp per-alternative confidences the model put out of range
    pub fn normalize(&mut self) {
        for alternative in &mut self.alternatives {
            if !(0.0..=1.0).contains(&alternative.confidence) {
                alternative.confidence = 0.5;
            }
        }
        self.recommendation_confidence = self.recommendation_confidence.clamp(0.0, 1.0);
    }

    /// Whether any alternative was recommended
    #[must_use]
    pub fn has_suggestions(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(confidence: f64) -> AlternativeSuggestion {
        AlternativeSuggestion {
            product_name: "Mattermost".to_string(),
            vendor_name: "Mattermost Inc".to_string(),
            vendor_website: Some("https://mattermost.com".to_string()),
            why_safer: "Self-hosted deployment keeps data in-house".to_string(),
            security_highlights: vec!["Open source".to_string()],
            key_differences: vec!["Self-hosted".to_string()],
            trade_offs: vec!["Operational overhead".to_string()],
            confidence,
            evidence_basis: Some("SOC 2 Type II".to_string()),
        }
    }

    #[test]
    fn fallback_has_no_suggestions() {
        let report = AlternativesReport::fallback("model unavailable");
        assert!(!report.has_suggestions());
        assert!((report.recommendation_confidence - 0.0).abs() < f64::EPSILON);
        assert_eq!(report.error.as_deref(), Some("model unavailable"));
    }

    #[test]
    fn normalize_clamps_out_of_range_confidences() {
        let mut report = AlternativesReport {
            alternatives: vec![suggestion(1.7), suggestion(-0.2), suggestion(0.8)],
            recommendation_confidence: 2.0,
            rationale: String::new(),
            note: None,
            for_product: None,
            suggested_at: Utc::now(),
            error: None,
        };
        report.normalize();
        assert!((report.alternatives[0].confidence - 0.5).abs() < f64::EPSILON);
        assert!((report.alternatives[1].confidence - 0.5).abs() < f64::EPSILON);
        assert!((report.alternatives[2].confidence - 0.8).abs() < f64::EPSILON);
        assert!((report.recommendation_confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_model_output_with_defaults() {
        let json = r#"{
            "alternatives": [{
                "product_name": "Mattermost",
                "vendor_name": "Mattermost Inc",
                "why_safer": "Self-hosted",
                "confidence": 0.8
            }],
            "recommendation_confidence": 0.75,
            "rationale": "Stronger posture available"
        }"#;
        let report: AlternativesReport = serde_json::from_str(json).unwrap();
        assert!(report.has_suggestions());
        assert!(report.alternatives[0].security_highlights.is_empty());
        assert!(report.note.is_none());
    }

    #[test]
    fn empty_model_output_deserializes() {
        let json = r#"{
            "alternatives": [],
            "recommendation_confidence": 0.0,
            "rationale": "Insufficient public evidence to recommend alternatives",
            "note": "More research needed"
        }"#;
        let report: AlternativesReport = serde_json::from_str(json).unwrap();
        assert!(!report.has_suggestions());
        assert_eq!(report.note.as_deref(), Some("More research needed"));
    }
}
