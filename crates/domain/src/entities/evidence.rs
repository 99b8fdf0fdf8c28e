//! Source evidence entities
//!
//! Evidence gathered for an assessment: vendor documents probed from
//! well-known URL patterns, findings from the CISA Known Exploited
//! Vulnerabilities catalog, and the derived evidence quality score.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kinds of vendor documents probed for during an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Security/trust overview page
    SecurityPage,
    /// Terms of service
    TermsOfService,
    /// Privacy policy
    PrivacyPolicy,
    /// Product security incident response team page
    PsirtPage,
}

impl SourceKind {
    /// All probed document kinds, in probe order
    pub const ALL: [Self; 4] = [
        Self::SecurityPage,
        Self::TermsOfService,
        Self::PrivacyPolicy,
        Self::PsirtPage,
    ];

    /// Stable identifier used in persisted documents and API payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecurityPage => "security_page",
            Self::TermsOfService => "terms_of_service",
            Self::PrivacyPolicy => "privacy_policy",
            Self::PsirtPage => "psirt_page",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who authored a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceLabel {
    /// Published by the vendor itself
    VendorStated,
    /// Published by an independent authority (CISA, NVD, CERT, ...)
    Independent,
}

/// One probed vendor document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Whether any candidate URL for this kind yielded usable content
    pub found: bool,

    /// URL that answered, when found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Truncated page content kept for prompt context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Evidence provenance label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<SourceLabel>,

    /// When the content was fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SourceDocument {
    /// A document that was located and fetched
    #[must_use]
    pub fn located(url: impl Into<String>, content: impl Into<String>, label: SourceLabel) -> Self {
        Self {
            found: true,
            url: Some(url.into()),
            content: Some(content.into()),
            source_label: Some(label),
            fetched_at: Some(Utc::now()),
        }
    }

    /// A document that no candidate URL yielded
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            found: false,
            url: None,
            content: None,
            source_label: None,
            fetched_at: None,
        }
    }
}

/// A single matching entry from the CISA KEV catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevMatch {
    /// CVE identifier
    pub cve_id: String,
    /// Short vulnerability name from the catalog
    pub vulnerability_name: String,
    /// Date the entry was added to the catalog
    pub date_added: String,
    /// CISA's required remediation action
    pub required_action: String,
}

/// Outcome of the CISA KEV catalog check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevFindings {
    /// Whether any catalog entries matched the vendor or product
    pub found: bool,

    /// Matching entries, capped for storage (see `total_matches` for the
    /// full count)
    #[serde(default)]
    pub matches: Vec<KevMatch>,

    /// Total number of matching entries in the catalog
    #[serde(default)]
    pub total_matches: usize,

    /// Free-form note (clean result, feed unavailability, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl KevFindings {
    /// Cap on stored matches; the full count is kept in `total_matches`
    pub const MAX_STORED_MATCHES: usize = 5;

    /// No matching entries - a good sign
    #[must_use]
    pub fn clean() -> Self {
        Self {
            found: false,
            matches: Vec::new(),
            total_matches: 0,
            note: Some("No known exploited vulnerabilities".to_string()),
        }
    }

    /// Matching entries were found
    #[must_use]
    pub fn exploited(mut matches: Vec<KevMatch>) -> Self {
        let total_matches = matches.len();
        matches.truncate(Self::MAX_STORED_MATCHES);
        Self {
            found: true,
            matches,
            total_matches,
            note: None,
        }
    }

    /// The catalog could not be fetched or parsed
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            found: false,
            matches: Vec::new(),
            total_matches: 0,
            note: Some(reason.into()),
        }
    }
}

/// Overall quality rating of the gathered evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityRating {
    Good,
    Moderate,
    Limited,
    Insufficient,
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Moderate => write!(f, "moderate"),
            Self::Limited => write!(f, "limited"),
            Self::Insufficient => write!(f, "insufficient"),
        }
    }
}

/// Quality and completeness of the evidence behind an assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceQuality {
    /// Overall rating
    pub quality: QualityRating,
    /// Sources that yielded content (KEV counts only when entries matched)
    pub sources_found: usize,
    /// Sources attempted, including the KEV check
    pub sources_attempted: usize,
    /// Found sources labeled independent
    pub independent_sources: usize,
    /// Found sources labeled vendor-stated
    pub vendor_sources: usize,
    /// Human-readable summary
    pub note: String,
}

impl EvidenceQuality {
    /// Score the gathered evidence
    ///
    /// Good requires at least three found sources with one independent among
    /// them; moderate needs two, limited one. A KEV hit counts as an
    /// independent source.
    #[must_use]
    pub fn assess(sources: &BTreeMap<SourceKind, SourceDocument>, kev: &KevFindings) -> Self {
        let found_documents = sources.values().filter(|s| s.found);
        let vendor_sources = found_documents
            .clone()
            .filter(|s| s.source_label == Some(SourceLabel::VendorStated))
            .count();
        let independent_documents = found_documents
            .clone()
            .filter(|s| s.source_label == Some(SourceLabel::Independent))
            .count();

        let sources_found = found_documents.count() + usize::from(kev.found);
        let sources_attempted = sources.len() + 1;
        let independent_sources = independent_documents + usize::from(kev.found);

        let quality = if sources_found >= 3 && independent_sources >= 1 {
            QualityRating::Good
        } else if sources_found >= 2 {
            QualityRating::Moderate
        } else if sources_found == 1 {
            QualityRating::Limited
        } else {
            QualityRating::Insufficient
        };

        let note = match quality {
            QualityRating::Good => "Good",
            QualityRating::Insufficient => "Insufficient public evidence",
            _ => "Limited evidence",
        }
        .to_string();

        Self {
            quality,
            sources_found,
            sources_attempted,
            independent_sources,
            vendor_sources,
            note,
        }
    }
}
