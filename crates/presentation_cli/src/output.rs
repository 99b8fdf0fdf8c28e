//! Report rendering for the terminal
//!
//! Three formats: `text` is the full report, `brief` is a handful of
//! lines, `json` is the raw outcome document.

use application::{AssessmentOutcome, CacheListing, ComparisonOutcome};
use clap::ValueEnum;
use domain::{Assessment, SourceKind};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full multi-section report
    #[default]
    Text,
    /// A few summary lines
    Brief,
    /// Raw JSON document
    Json,
}

/// Render an assessment outcome in the chosen format
pub fn render_assessment(outcome: &AssessmentOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Brief => Ok(render_brief(outcome)),
        OutputFormat::Text => Ok(render_text(outcome)),
    }
}

fn cache_note(outcome: &AssessmentOutcome) -> String {
    if outcome.from_cache {
        let age = outcome.cache_age_days.unwrap_or(0);
        format!(" (cached, {age}d old)")
    } else {
        String::new()
    }
}

fn render_brief(outcome: &AssessmentOutcome) -> String {
    let a = &outcome.assessment;
    let mut lines = vec![format!(
        "{} — {}{}",
        a.resolution.product_name,
        a.resolution.vendor_name,
        cache_note(outcome)
    )];
    lines.push(format!(
        "Category: {} / {}",
        a.classification.primary_category, a.classification.primary_subcategory
    ));
    lines.push(format!(
        "Evidence: {} | KEV entries: {}",
        a.evidence_quality.quality,
        a.kev_count()
    ));
    if let Some(first) = a.alternatives.alternatives.first() {
        lines.push(format!("Consider: {}", first.product_name));
    }
    lines.join("\n")
}

fn render_text(outcome: &AssessmentOutcome) -> String {
    let a = &outcome.assessment;
    let mut out = String::new();

    out.push_str(&format!(
        "Assessment: {}{}\n",
        a.input,
        cache_note(outcome)
    ));
    out.push_str(&format!(
        "  Product: {} ({})\n",
        a.resolution.product_name, a.resolution.vendor_name
    ));
    if a.resolution.has_website() {
        out.push_str(&format!("  Website: {}\n", a.resolution.vendor_website));
    }
    out.push_str(&format!(
        "  Resolution confidence: {:.2}\n",
        a.resolution.confidence
    ));

    out.push_str("\nSources:\n");
    for kind in SourceKind::ALL {
        let status = a
            .sources
            .get(&kind)
            .filter(|s| s.found)
            .map_or("not found".to_string(), |s| s.url.clone().unwrap_or_default());
        out.push_str(&format!("  {kind}: {status}\n"));
    }
    out.push_str(&format!(
        "  Evidence quality: {} ({}/{} found, {} independent)\n",
        a.evidence_quality.quality,
        a.evidence_quality.sources_found,
        a.evidence_quality.sources_attempted,
        a.evidence_quality.independent_sources
    ));

    out.push_str("\nKnown exploited vulnerabilities:\n");
    if a.kev.found {
        out.push_str(&format!("  {} matching entries\n", a.kev.total_matches));
        for m in &a.kev.matches {
            out.push_str(&format!("  - {} ({})\n", m.cve_id, m.vulnerability_name));
        }
    } else {
        let note = a.kev.note.as_deref().unwrap_or("none found");
        out.push_str(&format!("  {note}\n"));
    }

    out.push_str("\nClassification:\n");
    out.push_str(&format!(
        "  {} / {} (confidence {:.2}, basis: {})\n",
        a.classification.primary_category,
        a.classification.primary_subcategory,
        a.classification.confidence,
        a.classification.evidence_basis
    ));
    if !a.classification.reasoning.is_empty() {
        out.push_str(&format!("  {}\n", a.classification.reasoning));
    }

    out.push_str("\nSafer alternatives:\n");
    if a.alternatives.alternatives.is_empty() {
        let note = a
            .alternatives
            .note
            .as_deref()
            .unwrap_or("none suggested");
        out.push_str(&format!("  {note}\n"));
    } else {
        for alt in &a.alternatives.alternatives {
            out.push_str(&format!(
                "  - {} ({}): {}\n",
                alt.product_name, alt.vendor_name, alt.why_safer
            ));
        }
        out.push_str(&format!("  Rationale: {}\n", a.alternatives.rationale));
    }

    out
}

/// Render a comparison outcome
pub fn render_comparison(outcome: &ComparisonOutcome, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }

    let mut out = String::new();
    out.push_str("Comparison\n");
    for assessment in [&outcome.first, &outcome.second] {
        out.push_str(&summary_line(assessment));
    }
    out.push_str(&format!("\n{}\n", outcome.comparison.recommendation));
    Ok(out)
}

fn summary_line(a: &Assessment) -> String {
    format!(
        "  {} ({}): {} | evidence {} | {} KEV entries | security page: {}\n",
        a.resolution.product_name,
        a.resolution.vendor_name,
        a.classification.primary_subcategory,
        a.evidence_quality.quality,
        a.kev_count(),
        if a.has_source(SourceKind::SecurityPage) {
            "yes"
        } else {
            "no"
        }
    )
}

/// Render the cache listing
pub fn render_cache_listing(entries: &[CacheListing], ttl_days: u32) -> String {
    if entries.is_empty() {
        return "Cache is empty\n".to_string();
    }

    let mut out = format!("{} cached assessment(s), TTL {} days\n", entries.len(), ttl_days);
    for entry in entries {
        let freshness = if entry.stale { "stale" } else { "fresh" };
        out.push_str(&format!(
            "  {}  {} ({})  {}d old  [{}]\n",
            entry.key, entry.product_name, entry.vendor_name, entry.age_days, freshness
        ));
    }
    out
}
