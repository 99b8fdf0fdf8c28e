//! Candidate URL patterns and source provenance classification

use domain::{SourceKind, SourceLabel};

/// Hosts whose content counts as independent evidence rather than vendor
/// self-description
pub const INDEPENDENT_HOSTS: &[&str] = &[
    "cve.mitre.org",
    "nvd.nist.gov",
    "cisa.gov",
    "cert.org",
    "kb.cert.org",
    "securityscorecard",
];

/// Well-known URL paths tried for a document kind, in order
#[must_use]
pub const fn candidate_paths(kind: SourceKind) -> &'static [&'static str] {
    match kind {
        SourceKind::SecurityPage => &["/security", "/trust", "/compliance", "/trust-center"],
        SourceKind::TermsOfService => &["/terms", "/tos", "/legal/terms"],
        SourceKind::PrivacyPolicy => &["/privacy", "/legal/privacy"],
        SourceKind::PsirtPage => &["/psirt", "/security/advisories"],
    }
}

/// Classify a URL's provenance by its host
#[must_use]
pub fn classify_source(url: &str) -> SourceLabel {
    let host = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .next()
        .unwrap_or_default();

    if INDEPENDENT_HOSTS.iter().any(|h| host.contains(h)) {
        SourceLabel::Independent
    } else {
        SourceLabel::VendorStated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_candidates() {
        for kind in SourceKind::ALL {
            assert!(!candidate_paths(kind).is_empty());
        }
    }

    #[test]
    fn security_page_tries_security_first() {
        assert_eq!(candidate_paths(SourceKind::SecurityPage)[0], "/security");
    }

    #[test]
    fn vendor_hosts_are_vendor_stated() {
        assert_eq!(
            classify_source("https://slack.com/security"),
            SourceLabel::VendorStated
        );
    }

    #[test]
    fn government_advisory_hosts_are_independent() {
        assert_eq!(
            classify_source("https://www.cisa.gov/known-exploited-vulnerabilities"),
            SourceLabel::Independent
        );
        assert_eq!(
            classify_source("https://nvd.nist.gov/vuln/detail/CVE-2021-44228"),
            SourceLabel::Independent
        );
    }

    #[test]
    fn classification_only_inspects_the_host() {
        // Path mentioning an independent host must not change the label
        assert_eq!(
            classify_source("https://example.com/cisa.gov-report"),
            SourceLabel::VendorStated
        );
    }
}
