//! Taxonomy classification result

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// What kind of evidence a classification rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceBasis {
    VendorStated,
    Mixed,
    Independent,
    Insufficient,
}

impl fmt::Display for EvidenceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VendorStated => write!(f, "vendor-stated"),
            Self::Mixed => write!(f, "mixed"),
            Self::Independent => write!(f, "independent"),
            Self::Insufficient => write!(f, "insufficient"),
        }
    }
}

/// An additional category a multi-function product also belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryCategory {
    pub category: String,
    pub subcategory: String,
}

/// Security-relevant taxonomy classification of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Primary taxonomy category
    pub primary_category: String,

    /// Primary subcategory within the category
    pub primary_subcategory: String,

    /// Up to two additional categories for multi-function products
    #[serde(default)]
    pub secondary_categories: Vec<SecondaryCategory>,

    /// Model confidence in the classification (0.0 - 1.0)
    pub confidence: f64,

    /// Explanation citing the evidence used
    pub reasoning: String,

    /// Provenance of the evidence behind the classification
    pub evidence_basis: EvidenceBasis,

    /// Source kinds that informed the classification
    #[serde(default)]
    pub source_citations: Vec<String>,

    /// Main functions of the product
    #[serde(default)]
    pub key_functions: Vec<String>,

    /// SaaS, on-premise, hybrid, client-side or API
    #[serde(default = "unknown")]
    pub deployment_model: String,

    /// How much customer data the product touches
    #[serde(default = "unknown")]
    pub data_access_level: String,

    /// When the classification was produced
    #[serde(default = "Utc::now")]
    pub classified_at: DateTime<Utc>,

    /// Error message when this is a fallback classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl Classification {
    /// Fallback used when the model call or response parse fails
    #[must_use]
    pub fn fallback(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            primary_category: unknown(),
            primary_subcategory: "Unclassified".to_string(),
            secondary_categories: Vec::new(),
            confidence: 0.0,
            reasoning: format!("Classification failed: {error}"),
            evidence_basis: EvidenceBasis::Insufficient,
            source_citations: Vec::new(),
            key_functions: Vec::new(),
            deployment_model: unknown(),
            data_access_level: "unknown".to_string(),
            classified_at: Utc::now(),
            error: Some(error),
        }
    }

    /// Placeholder used when entity resolution was too uncertain to classify
    #[must_use]
    pub fn unresolvable() -> Self {
        Self {
            primary_category: unknown(),
            primary_subcategory: unknown(),
            secondary_categories: Vec::new(),
            confidence: 0.0,
            reasoning: "Cannot classify - entity resolution confidence too low".to_string(),
            evidence_basis: EvidenceBasis::Insufficient,
            source_citations: Vec::new(),
            key_functions: Vec::new(),
            deployment_model: unknown(),
            data_access_level: "unknown".to_string(),
            classified_at: Utc::now(),
            error: None,
        }
    }

    /// Validate ranges the model is prone to getting wrong
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::ValidationError(format!(
                "confidence must be 0-1, got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}
