//! Assessment service - The end-to-end assessment pipeline
//!
//! Orchestrates one assessment: cache lookup, entity resolution, source
//! probing, KEV check, classification, alternative suggestion, and the
//! final cache write. Every persistence step routes through the injected
//! store port; the service never touches storage directly.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    AlternativesReport, Assessment, AssessmentComparison, CacheKey, CacheRecord, Classification,
    EntityResolution, EvidenceQuality, KevFindings, SourceDocument, SourceKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    AssessmentStoreExt, AssessmentStorePort, InferencePort, KevCatalogPort, SourceProbePort,
    StorageInfo,
};
use crate::prompts;
use crate::target::{extract_domain, origin_for};

/// An assessment plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub assessment: Assessment,
    /// Whether the result was served from cache
    pub from_cache: bool,
    /// Age of the cached record in days, when served from cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age_days: Option<i64>,
}

/// Two assessments and their side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub first: Assessment,
    pub second: Assessment,
    pub comparison: AssessmentComparison,
}

/// One row of the cache listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheListing {
    pub key: CacheKey,
    pub product_name: String,
    pub vendor_name: String,
    pub cached_at: DateTime<Utc>,
    pub age_days: i64,
    pub stale: bool,
}

/// Service running the assessment pipeline
pub struct AssessmentService {
    inference: Arc<dyn InferencePort>,
    sources: Arc<dyn SourceProbePort>,
    kev: Arc<dyn KevCatalogPort>,
    store: Arc<dyn AssessmentStorePort>,
    ttl_days: u32,
}

impl fmt::Debug for AssessmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentService")
            .field("ttl_days", &self.ttl_days)
            .finish_non_exhaustive()
    }
}

impl AssessmentService {
    /// Create a new assessment service
    pub fn new(
        inference: Arc<dyn InferencePort>,
        sources: Arc<dyn SourceProbePort>,
        kev: Arc<dyn KevCatalogPort>,
        store: Arc<dyn AssessmentStorePort>,
        ttl_days: u32,
    ) -> Self {
        Self {
            inference,
            sources,
            kev,
            store,
            ttl_days,
        }
    }

    /// Run the full pipeline for a target, honoring the cache
    #[instrument(skip(self), fields(target = %target))]
    pub async fn assess(
        &self,
        target: &str,
        force_refresh: bool,
    ) -> Result<AssessmentOutcome, ApplicationError> {
        let key = CacheKey::derive(target);

        if !force_refresh {
            if let Some(outcome) = self.load_cached(&key).await {
                info!(key = %key, age_days = ?outcome.cache_age_days, "Serving cached assessment");
                return Ok(outcome);
            }
        }

        let domain_hint = extract_domain(target);
        let resolution = self.resolve_entity(target, domain_hint.as_deref()).await;

        info!(
            product = %resolution.product_name,
            vendor = %resolution.vendor_name,
            confidence = resolution.confidence,
            "Entity resolved"
        );

        let (sources, kev) = self.gather_evidence(&resolution).await;
        let evidence_quality = EvidenceQuality::assess(&sources, &kev);

        let classification = if resolution.is_confident() {
            self.classify(&resolution, &sources, &kev).await
        } else {
            debug!("Skipping classification - resolution confidence too low");
            Classification::unresolvable()
        };

        let alternatives = self.suggest_alternatives(&resolution, &classification, &kev).await;

        let assessment = Assessment {
            input: target.to_string(),
            cache_key: key.clone(),
            resolution,
            sources,
            kev,
            evidence_quality,
            classification,
            alternatives,
            resolved_at: Utc::now(),
        };

        // A failed cache write degrades future latency, not this result
        if let Err(e) = self.store.set_typed(&key, &assessment).await {
            warn!(key = %key, error = %e, "Failed to cache assessment");
        }

        Ok(AssessmentOutcome {
            assessment,
            from_cache: false,
            cache_age_days: None,
        })
    }

    /// Assess two targets and compare them
    pub async fn compare(
        &self,
        first_target: &str,
        second_target: &str,
    ) -> Result<ComparisonOutcome, ApplicationError> {
        let first = self.assess(first_target, false).await?.assessment;
        let second = self.assess(second_target, false).await?.assessment;
        let comparison = AssessmentComparison::between(&first, &second);
        Ok(ComparisonOutcome {
            first,
            second,
            comparison,
        })
    }

    /// List cached assessments with their age and staleness
    ///
    /// Records that fail to load are skipped, not fatal.
    pub async fn list_cached(&self) -> Result<Vec<CacheListing>, ApplicationError> {
        let now = Utc::now();
        let mut listings = Vec::new();

        for key in self.store.list_keys().await? {
            match self.store.get(&key).await {
                Ok(Some(record)) => {
                    listings.push(Self::listing_for(&key, &record, self.ttl_days, now));
                },
                Ok(None) => {},
                Err(e) => warn!(key = %key, error = %e, "Skipping unreadable cache entry"),
            }
        }

        Ok(listings)
    }

    /// Load the raw cache record for a key
    pub async fn cached_record(
        &self,
        key: &CacheKey,
    ) -> Result<Option<CacheRecord>, ApplicationError> {
        Ok(self.store.get(key).await?)
    }

    /// Delete one cached assessment
    pub async fn delete_cached(&self, key: &CacheKey) -> Result<bool, ApplicationError> {
        Ok(self.store.delete(key).await?)
    }

    /// Delete every cached assessment, returning the count removed
    pub async fn clear_cache(&self) -> Result<u64, ApplicationError> {
        Ok(self.store.clear_all().await?)
    }

    /// Describe the active storage backend
    #[must_use]
    pub fn storage_info(&self) -> StorageInfo {
        self.store.storage_info()
    }

    /// Configured freshness window in days
    #[must_use]
    pub const fn ttl_days(&self) -> u32 {
        self.ttl_days
    }

    /// Whether the inference backend is reachable
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Name of the model behind the inference port
    #[must_use]
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }

    // ------------------------------------------------------------------
    // Pipeline steps
    // ------------------------------------------------------------------

    /// Try to serve a fresh cached assessment
    async fn load_cached(&self, key: &CacheKey) -> Option<AssessmentOutcome> {
        let record = match self.store.get(key).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, assessing fresh");
                return None;
            },
        };

        let now = Utc::now();
        let age_days = record.age_days(now);
        if record.is_stale(self.ttl_days, now) {
            info!(key = %key, age_days, "Cached assessment is stale, refreshing");
            return None;
        }

        match serde_json::from_value::<Assessment>(Value::Object(record.into_document())) {
            Ok(assessment) => Some(AssessmentOutcome {
                assessment,
                from_cache: true,
                cache_age_days: Some(age_days),
            }),
            Err(e) => {
                warn!(key = %key, error = %e, "Cached record has unexpected shape, refreshing");
                None
            },
        }
    }

    /// Ask the model who makes the target product
    async fn resolve_entity(&self, target: &str, domain_hint: Option<&str>) -> EntityResolution {
        let prompt = prompts::resolution_prompt(target, domain_hint);

        let response = match self.inference.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Entity resolution call failed");
                return EntityResolution::unresolved(
                    format!("Resolution failed: {e}"),
                    domain_hint,
                );
            },
        };

        let payload = prompts::extract_json_payload(&response.content);
        match serde_json::from_str::<EntityResolution>(payload) {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(error = %e, "Entity resolution response did not parse");
                EntityResolution::unresolved(format!("Resolution failed: {e}"), domain_hint)
            },
        }
    }

    /// Probe vendor documents and the KEV catalog for a confident resolution
    async fn gather_evidence(
        &self,
        resolution: &EntityResolution,
    ) -> (BTreeMap<SourceKind, SourceDocument>, KevFindings) {
        if !resolution.is_confident() {
            debug!("Skipping source gathering - resolution confidence too low");
            return (
                BTreeMap::new(),
                KevFindings::unavailable("Not checked - entity resolution confidence too low"),
            );
        }
        if !resolution.has_website() {
            debug!("Skipping source gathering - no vendor website identified");
            return (
                BTreeMap::new(),
                self.kev
                    .check(&resolution.vendor_name, &resolution.product_name)
                    .await,
            );
        }

        let origin = origin_for(&resolution.vendor_website);
        let sources = self.sources.probe(&origin).await;
        let kev = self
            .kev
            .check(&resolution.vendor_name, &resolution.product_name)
            .await;
        (sources, kev)
    }

    /// Ask the model for a taxonomy classification
    async fn classify(
        &self,
        resolution: &EntityResolution,
        sources: &BTreeMap<SourceKind, SourceDocument>,
        kev: &KevFindings,
    ) -> Classification {
        let prompt = prompts::classification_prompt(resolution, sources, kev);

        let response = match self.inference.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Classification call failed");
                return Classification::fallback(e.to_string());
            },
        };

        let payload = prompts::extract_json_payload(&response.content);
        let mut value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Classification response did not parse");
                return Classification::fallback(e.to_string());
            },
        };
        Self::coerce_evidence_basis(&mut value);

        let classification = match serde_json::from_value::<Classification>(value) {
            Ok(classification) => classification,
            Err(e) => {
                warn!(error = %e, "Classification response has unexpected shape");
                return Classification::fallback(e.to_string());
            },
        };

        if let Err(e) = classification.validate() {
            warn!(error = %e, "Classification failed validation");
            return Classification::fallback(e.to_string());
        }

        info!(
            category = %classification.primary_category,
            subcategory = %classification.primary_subcategory,
            confidence = classification.confidence,
            basis = %classification.evidence_basis,
            "Classification complete"
        );
        classification
    }

    /// Replace an unknown `evidence_basis` value with `insufficient`
    fn coerce_evidence_basis(value: &mut Value) {
        const VALID: [&str; 4] = ["vendor-stated", "mixed", "independent", "insufficient"];

        if let Some(basis) = value.get("evidence_basis") {
            let recognized = basis.as_str().is_some_and(|s| VALID.contains(&s));
            if !recognized {
                warn!(basis = %basis, "Unknown evidence_basis, defaulting to insufficient");
                value["evidence_basis"] = Value::String("insufficient".to_string());
            }
        }
    }

    /// Ask the model for safer alternatives
    async fn suggest_alternatives(
        &self,
        resolution: &EntityResolution,
        classification: &Classification,
        kev: &KevFindings,
    ) -> AlternativesReport {
        let prompt = prompts::alternatives_prompt(resolution, classification, kev);

        let response = match self.inference.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Alternatives call failed");
                return AlternativesReport::fallback(e.to_string());
            },
        };

        let payload = prompts::extract_json_payload(&response.content);
        match serde_json::from_str::<AlternativesReport>(payload) {
            Ok(mut report) => {
                report.normalize();
                report.for_product = Some(resolution.product_name.clone());
                info!(
                    count = report.alternatives.len(),
                    confidence = report.recommendation_confidence,
                    "Alternatives suggested"
                );
                report
            },
            Err(e) => {
                warn!(error = %e, "Alternatives response did not parse");
                AlternativesReport::fallback(e.to_string())
            },
        }
    }

    fn listing_for(
        key: &CacheKey,
        record: &CacheRecord,
        ttl_days: u32,
        now: DateTime<Utc>,
    ) -> CacheListing {
        let field = |path: &[&str]| -> String {
            let mut current: Option<&Value> = record.document.get(path[0]);
            for segment in &path[1..] {
                current = current.and_then(|v| v.get(segment));
            }
            current
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string()
        };

        CacheListing {
            key: key.clone(),
            product_name: field(&["resolution", "product_name"]),
            vendor_name: field(&["resolution", "vendor_name"]),
            cached_at: record.cached_at,
            age_days: record.age_days(now),
            stale: record.is_stale(ttl_days, now),
        }
    }
}
