//! Complete assessment entity

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{
    AlternativesReport, Classification, EntityResolution, EvidenceQuality, KevFindings,
    QualityRating, SourceDocument, SourceKind,
};
use crate::value_objects::CacheKey;

/// Everything learned about one assessment target
///
/// This is the document persisted under the target's cache key. The cache
/// layer adds a `cached_at` timestamp on write; everything else is owned
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Raw user input the assessment was run for
    pub input: String,

    /// Cache key derived from the input
    pub cache_key: CacheKey,

    /// Product and vendor identification
    pub resolution: EntityResolution,

    /// Probed vendor documents by kind
    pub sources: BTreeMap<SourceKind, SourceDocument>,

    /// CISA KEV catalog findings
    pub kev: KevFindings,

    /// Quality score of the gathered evidence
    pub evidence_quality: EvidenceQuality,

    /// Taxonomy classification
    pub classification: Classification,

    /// Safer-alternative suggestions
    pub alternatives: AlternativesReport,

    /// When the assessment pipeline completed
    pub resolved_at: DateTime<Utc>,
}

impl Assessment {
    /// Number of known-exploited-vulnerability entries matching the product
    #[must_use]
    pub fn kev_count(&self) -> usize {
        self.kev.total_matches
    }

    /// Whether a given source kind yielded content
    #[must_use]
    pub fn has_source(&self, kind: SourceKind) -> bool {
        self.sources.get(&kind).is_some_and(|s| s.found)
    }

    /// Condensed view used for side-by-side comparison
    #[must_use]
    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            product_name: self.resolution.product_name.clone(),
            vendor_name: self.resolution.vendor_name.clone(),
            category: self.classification.primary_subcategory.clone(),
            deployment_model: self.classification.deployment_model.clone(),
            evidence_quality: self.evidence_quality.quality,
            kev_entries: self.kev_count(),
            has_security_page: self.has_source(SourceKind::SecurityPage),
            has_terms: self.has_source(SourceKind::TermsOfService),
        }
    }
}

/// Condensed per-product view for comparisons and cache listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub product_name: String,
    pub vendor_name: String,
    pub category: String,
    pub deployment_model: String,
    pub evidence_quality: QualityRating,
    pub kev_entries: usize,
    pub has_security_page: bool,
    pub has_terms: bool,
}

/// Side-by-side comparison of two assessed products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentComparison {
    pub first: AssessmentSummary,
    pub second: AssessmentSummary,

    /// Dimensions the summaries should be read along
    pub comparison_dimensions: Vec<String>,

    /// One-line verdict derived from the summaries
    pub recommendation: String,

    pub compared_at: DateTime<Utc>,
}

impl AssessmentComparison {
    /// Build a comparison from two completed assessments
    #[must_use]
    pub fn between(first: &Assessment, second: &Assessment) -> Self {
        let first = first.summary();
        let second = second.summary();
        let recommendation = Self::recommend(&first, &second);
        Self {
            first,
            second,
            comparison_dimensions: vec![
                "Security Posture".to_string(),
                "Evidence Quality".to_string(),
                "Known Vulnerabilities".to_string(),
                "Public Security Docs".to_string(),
                "Deployment Model".to_string(),
            ],
            recommendation,
            compared_at: Utc::now(),
        }
    }

    fn recommend(first: &AssessmentSummary, second: &AssessmentSummary) -> String {
        match first.kev_entries.cmp(&second.kev_entries) {
            std::cmp::Ordering::Greater => format!(
                "{} has {} known exploited vulnerabilities vs {} for {} - review before adopting",
                first.product_name, first.kev_entries, second.kev_entries, second.product_name
            ),
            std::cmp::Ordering::Less => format!(
                "{} has {} known exploited vulnerabilities vs {} for {} - review before adopting",
                second.product_name, second.kev_entries, first.kev_entries, first.product_name
            ),
            std::cmp::Ordering::Equal => {
                "No known exploited vulnerabilities separate the two products; compare evidence \
                 quality and deployment trade-offs"
                    .to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SourceLabel;

    fn sample_assessment(kev_total: usize) -> Assessment {
        let mut sources = BTreeMap::new();
        sources.insert(
            SourceKind::SecurityPage,
            SourceDocument::located(
                "https://example.com/security",
                "content",
                SourceLabel::VendorStated,
            ),
        );
        sources.insert(SourceKind::TermsOfService, SourceDocument::missing());

        let kev = if kev_total > 0 {
            KevFindings::exploited(
                (0..kev_total)
                    .map(|i| crate::entities::KevMatch {
                        cve_id: format!("CVE-2024-{i:04}"),
                        vulnerability_name: "Test".to_string(),
                        date_added: "2024-01-01".to_string(),
                        required_action: "Patch".to_string(),
                    })
                    .collect(),
            )
        } else {
            KevFindings::clean()
        };
        let evidence_quality = EvidenceQuality::assess(&sources, &kev);

        Assessment {
            input: "example".to_string(),
            cache_key: CacheKey::derive("example"),
            resolution: EntityResolution {
                product_name: "Example".to_string(),
                vendor_name: "Example Corp".to_string(),
                vendor_website: "https://example.com".to_string(),
                confidence: 0.9,
                reasoning: String::new(),
                alternative_names: Vec::new(),
            },
            sources,
            kev,
            evidence_quality,
            classification: Classification::unresolvable(),
            alternatives: AlternativesReport::fallback("not generated"),
            resolved_at: Utc::now(),
        }
    }

    #[test]
    fn summary_reflects_sources() {
        let summary = sample_assessment(0).summary();
        assert!(summary.has_security_page);
        assert!(!summary.has_terms);
        assert_eq!(summary.product_name, "Example");
    }

    #[test]
    fn has_source_is_false_for_missing_and_absent_kinds() {
        let assessment = sample_assessment(0);
        assert!(!assessment.has_source(SourceKind::TermsOfService));
        assert!(!assessment.has_source(SourceKind::PsirtPage));
    }

    #[test]
    fn comparison_flags_the_product_with_kev_entries() {
        let risky = sample_assessment(3);
        let clean = sample_assessment(0);
        let comparison = AssessmentComparison::between(&risky, &clean);
        assert!(comparison.recommendation.starts_with("Example has 3"));
        assert_eq!(comparison.comparison_dimensions.len(), 5);
    }

    #[test]
    fn comparison_is_neutral_when_kev_counts_match() {
        let a = sample_assessment(0);
        let b = sample_assessment(0);
        let comparison = AssessmentComparison::between(&a, &b);
        assert!(comparison.recommendation.contains("compare evidence"));
    }

    #[test]
    fn assessment_round_trips_through_json() {
        let assessment = sample_assessment(2);
        let json = serde_json::to_string(&assessment).unwrap();
        let back: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kev_count(), 2);
        assert_eq!(back.cache_key, assessment.cache_key);
        assert!(back.has_source(SourceKind::SecurityPage));
    }

    #[test]
    fn sources_map_serializes_with_kind_keys() {
        let assessment = sample_assessment(0);
        let value = serde_json::to_value(&assessment).unwrap();
        assert!(value["sources"].get("security_page").is_some());
    }
}
