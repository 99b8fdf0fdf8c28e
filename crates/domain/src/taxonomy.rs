//! Software taxonomy table
//!
//! The fixed set of security-relevant categories products are classified
//! into, plus typical risk profiles for the subcategories that warrant
//! special attention.

use serde::Serialize;

/// One taxonomy category and its subcategories
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaxonomyCategory {
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

/// The classification taxonomy
pub const TAXONOMY: &[TaxonomyCategory] = &[
    TaxonomyCategory {
        name: "Communication & Collaboration",
        subcategories: &[
            "Team Chat/Messaging",
            "Video Conferencing",
            "Email Service",
            "Project Management",
        ],
    },
    TaxonomyCategory {
        name: "Data & Storage",
        subcategories: &[
            "File Sharing/Storage",
            "Database Service",
            "Backup/Archive",
            "Content Management",
        ],
    },
    TaxonomyCategory {
        name: "Development & DevOps",
        subcategories: &[
            "Code Repository",
            "CI/CD Pipeline",
            "Container/Orchestration",
            "API Management",
            "Development Tool",
        ],
    },
    TaxonomyCategory {
        name: "AI & Machine Learning",
        subcategories: &["GenAI Tool/Assistant", "ML Platform", "AI API Service"],
    },
    TaxonomyCategory {
        name: "Business Applications",
        subcategories: &[
            "CRM System",
            "ERP System",
            "HR/Payroll",
            "Marketing Automation",
            "Analytics/BI",
        ],
    },
    TaxonomyCategory {
        name: "Security & Infrastructure",
        subcategories: &[
            "Endpoint Agent/EDR",
            "Identity/SSO",
            "Network Security",
            "Cloud Infrastructure",
            "Monitoring/Observability",
        ],
    },
    TaxonomyCategory {
        name: "Productivity",
        subcategories: &[
            "Document Editor",
            "Calendar/Scheduling",
            "Note-taking",
            "Form/Survey",
        ],
    },
];

/// Typical risk profile for a taxonomy subcategory
#[derive(Debug, Clone, Serialize)]
pub struct RiskProfile {
    pub typical_risks: &'static [&'static str],
    pub data_sensitivity: &'static str,
    pub common_controls: &'static [&'static str],
}

/// Risk profile for a subcategory, falling back to a generic profile
#[must_use]
pub fn risk_profile(subcategory: &str) -> RiskProfile {
    match subcategory {
        "File Sharing/Storage" => RiskProfile {
            typical_risks: &[
                "Data exfiltration",
                "Unauthorized sharing",
                "Compliance violations (GDPR, HIPAA)",
                "Shadow IT proliferation",
            ],
            data_sensitivity: "high",
            common_controls: &["DLP", "Access controls", "Encryption at rest/transit"],
        },
        "GenAI Tool/Assistant" => RiskProfile {
            typical_risks: &[
                "Data leakage to training",
                "Prompt injection attacks",
                "Intellectual property exposure",
                "Hallucination/accuracy issues",
            ],
            data_sensitivity: "high",
            common_controls: &["Data residency", "Terms review", "Input filtering"],
        },
        "Endpoint Agent/EDR" => RiskProfile {
            typical_risks: &[
                "Privileged access abuse",
                "Performance impact",
                "Single point of failure",
                "Supply chain compromise",
            ],
            data_sensitivity: "high",
            common_controls: &["Vendor security audit", "Least privilege", "Monitoring"],
        },
        "Team Chat/Messaging" => RiskProfile {
            typical_risks: &[
                "Data retention issues",
                "Insider threats",
                "Third-party app risks",
                "Compliance gaps",
            ],
            data_sensitivity: "medium-high",
            common_controls: &[
                "Message retention policies",
                "App approval process",
                "E2E encryption",
            ],
        },
        "CRM System" => RiskProfile {
            typical_risks: &[
                "Customer data breach",
                "Integration vulnerabilities",
                "Access control failures",
                "GDPR/privacy violations",
            ],
            data_sensitivity: "high",
            common_controls: &["Role-based access", "Audit logging", "Data encryption"],
        },
        _ => RiskProfile {
            typical_risks: &["General software risks apply"],
            data_sensitivity: "medium",
            common_controls: &["Standard security controls"],
        },
    }
}

/// Render the taxonomy as an indented list for prompt context
#[must_use]
pub fn format_for_prompt() -> String {
    let mut out = String::new();
    for category in TAXONOMY {
        out.push_str("  ");
        out.push_str(category.name);
        out.push_str(":\n");
        for subcategory in category.subcategories {
            out.push_str("    - ");
            out.push_str(subcategory);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_seven_categories() {
        assert_eq!(TAXONOMY.len(), 7);
    }

    #[test]
    fn every_category_has_subcategories() {
        for category in TAXONOMY {
            assert!(
                !category.subcategories.is_empty(),
                "{} has no subcategories",
                category.name
            );
        }
    }

    #[test]
    fn subcategories_are_unique_across_categories() {
        let mut seen = std::collections::HashSet::new();
        for category in TAXONOMY {
            for subcategory in category.subcategories {
                assert!(seen.insert(subcategory), "duplicate subcategory {subcategory}");
            }
        }
    }

    #[test]
    fn known_subcategory_has_specific_profile() {
        let profile = risk_profile("GenAI Tool/Assistant");
        assert_eq!(profile.data_sensitivity, "high");
        assert!(profile.typical_risks.iter().any(|r| r.contains("Prompt injection")));
    }

    #[test]
    fn unknown_subcategory_gets_generic_profile() {
        let profile = risk_profile("Form/Survey");
        assert_eq!(profile.data_sensitivity, "medium");
        assert_eq!(profile.typical_risks, &["General software risks apply"]);
    }

    #[test]
    fn prompt_rendering_lists_all_subcategories() {
        let rendered = format_for_prompt();
        for category in TAXONOMY {
            assert!(rendered.contains(category.name));
            for subcategory in category.subcategories {
                assert!(rendered.contains(subcategory));
            }
        }
    }

    #[test]
    fn prompt_rendering_indents_subcategories() {
        let rendered = format_for_prompt();
        assert!(rendered.contains("  Communication & Collaboration:\n"));
        assert!(rendered.contains("    - Team Chat/Messaging\n"));
    }
}
