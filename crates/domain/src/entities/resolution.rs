//! Entity resolution result

use serde::{Deserialize, Serialize};

/// Threshold below which a resolution is too uncertain to act on
pub const CONFIDENCE_FLOOR: f64 = 0.5;

/// The product and vendor identified for a user's input
///
/// Produced by the language model from the raw input (and an extracted
/// domain, when the input looked like a URL). Fields default to unknowns so
/// a partially valid model response still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResolution {
    /// Official product name
    #[serde(default = "unknown")]
    pub product_name: String,

    /// Company that makes the product
    #[serde(default = "unknown")]
    pub vendor_name: String,

    /// Primary vendor website URL
    #[serde(default = "unknown")]
    pub vendor_website: String,

    /// Model confidence in the identification (0.0 - 1.0)
    #[serde(default)]
    pub confidence: f64,

    /// Brief explanation of the identification
    #[serde(default)]
    pub reasoning: String,

    /// Known aliases for the product
    #[serde(default)]
    pub alternative_names: Vec<String>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl EntityResolution {
    /// Fallback resolution used when the model call or parse fails
    #[must_use]
    pub fn unresolved(reason: impl Into<String>, domain: Option<&str>) -> Self {
        Self {
            product_name: unknown(),
            vendor_name: unknown(),
            vendor_website: domain.map_or_else(unknown, |d| d.to_string()),
            confidence: 0.0,
            reasoning: reason.into(),
            alternative_names: Vec::new(),
        }
    }

    /// Whether the resolution is confident enough to gather evidence for
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_FLOOR
    }

    /// Whether a usable vendor website was identified
    #[must_use]
    pub fn has_website(&self) -> bool {
        !self.vendor_website.is_empty() && self.vendor_website != "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_has_zero_confidence() {
        let resolution = EntityResolution::unresolved("model unavailable", None);
        assert!((resolution.confidence - 0.0).abs() < f64::EPSILON);
        assert_eq!(resolution.product_name, "Unknown");
        assert!(!resolution.is_confident());
    }

    #[test]
    fn unresolved_keeps_extracted_domain() {
        let resolution = EntityResolution::unresolved("parse error", Some("example.com"));
        assert_eq!(resolution.vendor_website, "example.com");
        assert!(resolution.has_website());
    }

    #[test]
    fn confidence_floor_is_inclusive() {
        let resolution = EntityResolution {
            confidence: CONFIDENCE_FLOOR,
            ..EntityResolution::unresolved("", None)
        };
        assert!(resolution.is_confident());
    }

    #[test]
    fn unknown_website_is_not_usable() {
        let resolution = EntityResolution::unresolved("", None);
        assert!(!resolution.has_website());
    }

    #[test]
    fn deserializes_from_partial_model_output() {
        let json = r#"{"product_name": "Slack", "confidence": 0.9}"#;
        let resolution: EntityResolution = serde_json::from_str(json).unwrap();
        assert_eq!(resolution.product_name, "Slack");
        assert_eq!(resolution.vendor_name, "Unknown");
        assert!(resolution.is_confident());
        assert!(resolution.alternative_names.is_empty());
    }

    #[test]
    fn deserializes_full_model_output() {
        let json = r#"{
            "product_name": "Slack",
            "vendor_name": "Salesforce",
            "vendor_website": "https://slack.com",
            "confidence": 0.95,
            "reasoning": "Well-known team chat product",
            "alternative_names": ["Slack Technologies"]
        }"#;
        let resolution: EntityResolution = serde_json::from_str(json).unwrap();
        assert_eq!(resolution.vendor_name, "Salesforce");
        assert_eq!(resolution.alternative_names.len(), 1);
    }
}
