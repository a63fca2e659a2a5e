//! URL helper functions for the Eporner API
//!
//! Provides functions for building query strings and request URLs.

/// Builds a query string from ordered key/value pairs
///
/// Keys and values are percent-encoded. Returns an empty string when
/// there are no pairs.
///
/// # Example
/// ```
/// use eporner_core::url::build_query_string;
/// let pairs = vec![("query".to_string(), "big cats".to_string()), ("page".to_string(), "2".to_string())];
/// assert_eq!(build_query_string(&pairs), "query=big%20cats&page=2");
/// ```
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the full request URL for an endpoint
///
/// # Arguments
/// * `base_url` - Scheme and host (e.g., "https://www.eporner.com"); a trailing slash is ignored
/// * `endpoint` - Endpoint path (e.g., "/api/v2/video/id/")
/// * `pairs` - Query parameters, appended in order
///
/// # Example
/// ```
/// use eporner_core::url::build_url;
/// let url = build_url("https://www.eporner.com", "/api/v2/video/removed/", &[("format".to_string(), "txt".to_string())]);
/// assert_eq!(url, "https://www.eporner.com/api/v2/video/removed/?format=txt");
/// ```
pub fn build_url(base_url: &str, endpoint: &str, pairs: &[(String, String)]) -> String {
    let base = base_url.trim_end_matches('/');
    if pairs.is_empty() {
        return format!("{}{}", base, endpoint);
    }
    format!("{}{}?{}", base, endpoint, build_query_string(pairs))
}
