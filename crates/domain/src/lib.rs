//! Domain layer - Entities and value objects
//!
//! Pure types for software assessments: cache keys and records, entity
//! resolution results, gathered source evidence, taxonomy classification,
//! and safer-alternative suggestions. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod taxonomy;
pub mod value_objects;

pub use entities::{
    AlternativeSuggestion, AlternativesReport, Assessment, AssessmentComparison,
    AssessmentSummary, CacheRecord, Classification, EntityResolution, EvidenceBasis,
    EvidenceQuality, KevFindings, KevMatch, QualityRating, SecondaryCategory, SourceDocument,
    SourceKind, SourceLabel,
};
pub use errors::DomainError;
pub use taxonomy::{RiskProfile, TaxonomyCategory, TAXONOMY};
pub use value_objects::CacheKey;
