//! Application services - Use case implementations

mod assessment_service;

pub use assessment_service::{
    AssessmentOutcome, AssessmentService, CacheListing, ComparisonOutcome,
};
