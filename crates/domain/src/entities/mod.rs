//! Assessment domain entities

mod alternatives;
mod assessment;
mod cache_record;
mod classification;
mod evidence;
mod resolution;

pub use alternatives::{AlternativeSuggestion, AlternativesReport};
pub use assessment::{Assessment, AssessmentComparison, AssessmentSummary};
pub use cache_record::CacheRecord;
pub use classification::{Classification, EvidenceBasis, SecondaryCategory};
pub use evidence::{
    EvidenceQuality, KevFindings, KevMatch, QualityRating, SourceDocument, SourceKind, SourceLabel,
};
pub use resolution::EntityResolution;
