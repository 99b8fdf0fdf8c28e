//! Target input parsing
//!
//! Users hand the assessor either a product name ("Slack") or something
//! URL-shaped ("https://slack.com/features", "www.slack.com"). For the
//! latter we pull out the bare domain so entity resolution and source
//! probing can use it.

/// Extract a domain from URL-shaped input
///
/// Returns `None` for plain product names. The scheme, a leading `www.`,
/// and any path/query are stripped from the result.
#[must_use]
pub fn extract_domain(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if !trimmed.contains("://") && !trimmed.starts_with("www.") {
        return None;
    }

    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .trim_start_matches("www.");

    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Web origin to probe for a vendor website field
///
/// Accepts either a full URL or a bare domain and yields `scheme://host`.
#[must_use]
pub fn origin_for(vendor_website: &str) -> String {
    let trimmed = vendor_website.trim().trim_end_matches('/');
    if let Some((scheme, rest)) = trimmed.split_once("://") {
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        format!("{scheme}://{host}")
    } else {
        let host = trimmed.split(['/', '?', '#']).next().unwrap_or_default();
        format!("https://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_product_names_have_no_domain() {
        assert_eq!(extract_domain("Slack"), None);
        assert_eq!(extract_domain("Microsoft Teams"), None);
    }

    #[test]
    fn https_urls_yield_their_host() {
        assert_eq!(extract_domain("https://slack.com"), Some("slack.com".to_string()));
        assert_eq!(
            extract_domain("https://slack.com/features?tab=1"),
            Some("slack.com".to_string())
        );
    }

    #[test]
    fn www_prefix_counts_as_a_url_and_is_stripped() {
        assert_eq!(extract_domain("www.slack.com"), Some("slack.com".to_string()));
        assert_eq!(
            extract_domain("https://www.slack.com/pricing"),
            Some("slack.com".to_string())
        );
    }

    #[test]
    fn host_is_lowercased() {
        assert_eq!(extract_domain("https://Slack.COM"), Some("slack.com".to_string()));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(extract_domain("  https://slack.com  "), Some("slack.com".to_string()));
    }

    #[test]
    fn bare_scheme_yields_nothing() {
        assert_eq!(extract_domain("https://"), None);
    }

    #[test]
    fn origin_for_bare_domain_defaults_to_https() {
        assert_eq!(origin_for("slack.com"), "https://slack.com");
    }

    #[test]
    fn origin_for_url_keeps_scheme_and_drops_path() {
        assert_eq!(origin_for("http://slack.com/features"), "http://slack.com");
        assert_eq!(origin_for("https://slack.com/"), "https://slack.com");
    }
}
