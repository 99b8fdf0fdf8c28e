//! KEV feed wire models

use domain::KevMatch;
use serde::{Deserialize, Serialize};

/// The KEV catalog as published by CISA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevCatalog {
    #[serde(rename = "catalogVersion", default)]
    pub catalog_version: Option<String>,

    #[serde(rename = "dateReleased", default)]
    pub date_released: Option<String>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub vulnerabilities: Vec<KevVulnerability>,
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevVulnerability {
    #[serde(rename = "cveID", default)]
    pub cve_id: String,

    #[serde(rename = "vendorProject", default)]
    pub vendor_project: String,

    #[serde(default)]
    pub product: String,

    #[serde(rename = "vulnerabilityName", default)]
    pub vulnerability_name: String,

    #[serde(rename = "dateAdded", default)]
    pub date_added: String,

    #[serde(rename = "shortDescription", default)]
    pub short_description: String,

    #[serde(rename = "requiredAction", default)]
    pub required_action: String,
}

impl KevVulnerability {
    /// Case-insensitive substring match against vendor or product name
    #[must_use]
    pub fn matches(&self, vendor_name: &str, product_name: &str) -> bool {
        let vendor = vendor_name.trim().to_lowercase();
        let product = product_name.trim().to_lowercase();

        let vendor_match =
            !vendor.is_empty() && self.vendor_project.to_lowercase().contains(&vendor);
        let product_match = !product.is_empty() && self.product.to_lowercase().contains(&product);

        vendor_match || product_match
    }
}

impl From<&KevVulnerability> for KevMatch {
    fn from(vuln: &KevVulnerability) -> Self {
        Self {
            cve_id: vuln.cve_id.clone(),
            vulnerability_name: vuln.vulnerability_name.clone(),
            date_added: vuln.date_added.clone(),
            required_action: vuln.required_action.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(vendor: &str, product: &str) -> KevVulnerability {
        KevVulnerability {
            cve_id: "CVE-2024-0001".to_string(),
            vendor_project: vendor.to_string(),
            product: product.to_string(),
            vulnerability_name: "Test Vulnerability".to_string(),
            date_added: "2024-01-01".to_string(),
            short_description: String::new(),
            required_action: "Apply updates".to_string(),
        }
    }

    #[test]
    fn matches_vendor_case_insensitively() {
        let vuln = entry("Microsoft", "Exchange Server");
        assert!(vuln.matches("microsoft", "nonexistent"));
        assert!(vuln.matches("MICROSOFT", "nonexistent"));
    }

    #[test]
    fn matches_product_substring() {
        let vuln = entry("SomeVendor", "Exchange Server");
        assert!(vuln.matches("other", "exchange"));
    }

    #[test]
    fn no_match_for_unrelated_names() {
        let vuln = entry("Microsoft", "Exchange Server");
        assert!(!vuln.matches("slack", "slack"));
    }

    #[test]
    fn empty_names_never_match() {
        let vuln = entry("Microsoft", "Exchange Server");
        assert!(!vuln.matches("", ""));
        assert!(!vuln.matches("  ", "  "));
    }

    #[test]
    fn catalog_deserializes_cisa_field_names() {
        let json = r#"{
            "catalogVersion": "2024.01.15",
            "count": 1,
            "vulnerabilities": [{
                "cveID": "CVE-2021-44228",
                "vendorProject": "Apache",
                "product": "Log4j2",
                "vulnerabilityName": "Apache Log4j2 Remote Code Execution Vulnerability",
                "dateAdded": "2021-12-10",
                "shortDescription": "JNDI features do not protect against attacker controlled endpoints.",
                "requiredAction": "Apply updates per vendor instructions."
            }]
        }"#;
        let catalog: KevCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.vulnerabilities.len(), 1);
        assert_eq!(catalog.vulnerabilities[0].cve_id, "CVE-2021-44228");
        assert_eq!(catalog.vulnerabilities[0].vendor_project, "Apache");
    }

    #[test]
    fn kev_match_conversion_keeps_remediation_fields() {
        let vuln = entry("Apache", "Log4j2");
        let kev_match = KevMatch::from(&vuln);
        assert_eq!(kev_match.cve_id, "CVE-2024-0001");
        assert_eq!(kev_match.required_action, "Apply updates");
    }
}
