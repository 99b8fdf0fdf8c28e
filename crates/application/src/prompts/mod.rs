//! Prompt construction and response extraction
//!
//! The three LLM calls of the assessment pipeline - entity resolution,
//! taxonomy classification, alternative suggestion - are plain prompt
//! strings asking for bare JSON back. Models regularly wrap the JSON in
//! markdown code fences anyway; `extract_json_payload` undoes that.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use domain::{
    taxonomy, Classification, EntityResolution, KevFindings, SourceDocument, SourceKind,
};

/// Characters of source content quoted per evidence snippet
const SNIPPET_LEN: usize = 500;

/// Strip surrounding markdown code fences from a model response
///
/// Handles ` ``` ` and ` ```json ` fences; anything after the closing
/// fence is discarded. Input without fences is returned trimmed.
#[must_use]
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let body = rest.find("```").map_or(rest, |end| &rest[..end]);
    body.trim()
}

/// Prompt asking the model to identify product and vendor for an input
#[must_use]
pub fn resolution_prompt(input: &str, domain: Option<&str>) -> String {
    let domain_line = domain.map_or(String::new(), |d| format!("Extracted domain: {d}\n"));
    format!(
        r#"Given this input: "{input}"
{domain_line}
Your task: Identify the SOFTWARE PRODUCT and VENDOR company.

Respond ONLY with valid JSON (no markdown, no extra text):
{{
  "product_name": "Official product name",
  "vendor_name": "Company that makes it",
  "vendor_website": "Primary vendor website URL",
  "confidence": 0.0-1.0,
  "reasoning": "Brief explanation of identification",
  "alternative_names": ["alias1", "alias2"]
}}

If you cannot identify it confidently, set confidence < 0.5 and explain why.
"#
    )
}

/// Quote the gathered evidence for use in a prompt
fn evidence_snippets(
    sources: &BTreeMap<SourceKind, SourceDocument>,
    kev: &KevFindings,
) -> String {
    let mut snippets = Vec::new();

    for (kind, document) in sources {
        if !document.found {
            continue;
        }
        let label = document
            .source_label
            .map_or("UNKNOWN", |l| match l {
                domain::SourceLabel::VendorStated => "VENDOR-STATED",
                domain::SourceLabel::Independent => "INDEPENDENT",
            });
        if let Some(content) = &document.content {
            let quoted: String = content.chars().take(SNIPPET_LEN).collect();
            snippets.push(format!("[{label} - {kind}] {quoted}..."));
        }
    }

    if kev.found {
        snippets.push(
            "[INDEPENDENT - CISA KEV] Product found in Known Exploited Vulnerabilities catalog"
                .to_string(),
        );
    }

    if snippets.is_empty() {
        "No source evidence available".to_string()
    } else {
        snippets.join("\n")
    }
}

/// Prompt asking the model to classify a product into the taxonomy
#[must_use]
pub fn classification_prompt(
    resolution: &EntityResolution,
    sources: &BTreeMap<SourceKind, SourceDocument>,
    kev: &KevFindings,
) -> String {
    format!(
        r#"You are a cybersecurity expert classifying software for risk assessment.

PRODUCT: {product}
VENDOR: {vendor}

EVIDENCE FROM SOURCES:
{evidence}

AVAILABLE TAXONOMY CATEGORIES:
{taxonomy}
Your task:
1. Classify this software into ONE primary category and subcategory
2. Identify up to 2 secondary categories if product has multiple functions
3. Provide confidence score (0.0-1.0) based on evidence quality
4. Cite which sources informed your classification
5. Note if classification is based on vendor claims vs independent evidence

Respond ONLY with valid JSON (no markdown, no extra text):
{{
  "primary_category": "Category",
  "primary_subcategory": "Subcategory",
  "secondary_categories": [
    {{"category": "Category", "subcategory": "Subcategory"}}
  ],
  "confidence": 0.0-1.0,
  "reasoning": "Clear explanation citing sources",
  "evidence_basis": "vendor-stated | mixed | independent | insufficient",
  "source_citations": ["source_type that informed classification"],
  "key_functions": ["function1", "function2", "function3"],
  "deployment_model": "SaaS | On-premise | Hybrid | Client-side | API",
  "data_access_level": "high | medium | low | none"
}}

CRITICAL: If evidence is insufficient or contradictory, set confidence < 0.5 and note "Insufficient public evidence" in reasoning.
"#,
        product = resolution.product_name,
        vendor = resolution.vendor_name,
        evidence = evidence_snippets(sources, kev),
        taxonomy = taxonomy::format_for_prompt(),
    )
}

/// Prompt asking the model for safer alternatives in the same category
#[must_use]
pub fn alternatives_prompt(
    resolution: &EntityResolution,
    classification: &Classification,
    kev: &KevFindings,
) -> String {
    let mut risk_signals = String::new();
    if kev.found {
        let _ = writeln!(
            risk_signals,
            "Found in CISA KEV with {} exploited vulnerabilities",
            kev.total_matches
        );
    }
    if risk_signals.is_empty() {
        risk_signals.push_str("No critical risk signals detected");
    }

    let functions = if classification.key_functions.is_empty() {
        "general software functionality".to_string()
    } else {
        classification.key_functions.join(", ")
    };

    format!(
        r#"You are a cybersecurity advisor recommending safer alternatives for enterprise software.

CURRENT PRODUCT: {product} by {vendor}
CATEGORY: {category}
KEY FUNCTIONS: {functions}
DEPLOYMENT: {deployment}
RISK SIGNALS: {risk_signals}

Your task: Recommend 1-2 SAFER alternatives in the same category that:
- Provide similar functionality
- Have better security posture (based on public evidence)
- Are enterprise-ready and reputable
- Have good compliance/certification track record

For each alternative, provide:
1. Product name and vendor
2. Why it's safer (specific security advantages with evidence)
3. Key differences from current product
4. Any trade-offs (cost, features, complexity)

IMPORTANT RULES:
- Only recommend if you have HIGH confidence based on public security reputation
- Prefer alternatives with: SOC 2, ISO 27001, transparent security practices, good vulnerability disclosure
- Do NOT recommend if insufficient evidence exists
- Be honest about confidence level
- Cite specific security advantages (e.g., "Has SOC 2 Type II", "Zero CISA KEV entries", "Open source with security audits")

Respond ONLY with valid JSON (no markdown):
{{
  "alternatives": [
    {{
      "product_name": "Alternative Product",
      "vendor_name": "Vendor Name",
      "vendor_website": "https://example.com",
      "why_safer": "Specific security advantages with evidence",
      "security_highlights": ["advantage1", "advantage2", "advantage3"],
      "key_differences": ["difference1", "difference2"],
      "trade_offs": ["tradeoff1", "tradeoff2"],
      "confidence": 0.0-1.0,
      "evidence_basis": "Has SOC 2, ISO 27001, etc."
    }}
  ],
  "recommendation_confidence": 0.0-1.0,
  "rationale": "Overall reasoning for recommendations",
  "note": "Any important caveats or disclaimers"
}}

If you cannot confidently recommend safer alternatives, return:
{{
  "alternatives": [],
  "recommendation_confidence": 0.0,
  "rationale": "Insufficient public evidence to recommend alternatives",
  "note": "More research needed or current product may be appropriate choice"
}}
"#,
        product = resolution.product_name,
        vendor = resolution.vendor_name,
        category = classification.primary_subcategory,
        deployment = classification.deployment_model,
    )
}
