//! Application state shared across handlers

use std::sync::Arc;

use application::AssessmentService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Assessment service running the pipeline and cache administration
    pub service: Arc<AssessmentService>,
}

impl AppState {
    /// Create state around an assessment service
    #[must_use]
    pub fn new(service: Arc<AssessmentService>) -> Self {
        Self { service }
    }
}
