//! Endpoint catalog for the Eporner v2 API
//!
//! Endpoint paths, default parameter values and the closed value
//! domains every request parameter is checked against.

/// Base URL for the Eporner API
pub const BASE_URL: &str = "https://www.eporner.com";

pub const ENDPOINT_SEARCH: &str = "/api/v2/video/search/";
pub const ENDPOINT_ID: &str = "/api/v2/video/id/";
pub const ENDPOINT_REMOVED: &str = "/api/v2/video/removed/";

pub const DEFAULT_QUERY: &str = "all";
pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_GAY: u8 = 0;
pub const DEFAULT_LQ: u8 = 1;

pub const MAX_PER_PAGE: u32 = 1000;
pub const MAX_PAGE: u32 = 1_000_000;

pub const VALID_THUMB_SIZES: [&str; 3] = ["small", "medium", "big"];
pub const VALID_ORDERS: [&str; 7] = [
    "latest",
    "longest",
    "shortest",
    "top-rated",
    "most-popular",
    "top-weekly",
    "top-monthly",
];
/// Formats accepted by search and single-video lookup
pub const VALID_FORMATS: [&str; 2] = ["json", "xml"];
/// Formats accepted by the removed-videos endpoint only
pub const VALID_REMOVED_FORMATS: [&str; 3] = ["json", "xml", "txt"];
/// Values for the `gay` and `lq` filters: 0 = exclude, 1 = include, 2 = only
pub const VALID_FILTER_OPTIONS: [u8; 3] = [0, 1, 2];

/// Nominal `(width, height)` of each thumbnail size
pub const THUMB_DIMENSIONS: [(&str, u32, u32); 3] = [
    ("small", 190, 152),
    ("medium", 427, 240),
    ("big", 640, 360),
];

/// Full API URL for an endpoint on the default host
///
/// # Example
/// ```
/// use eporner_core::api::{get_url, ENDPOINT_SEARCH};
/// assert_eq!(get_url(ENDPOINT_SEARCH), "https://www.eporner.com/api/v2/video/search/");
/// ```
pub fn get_url(endpoint: &str) -> String {
    format!("{}{}", BASE_URL, endpoint)
}

pub fn is_valid_thumb_size(thumbsize: &str) -> bool {
    VALID_THUMB_SIZES.contains(&thumbsize)
}

pub fn is_valid_order(order: &str) -> bool {
    VALID_ORDERS.contains(&order)
}

pub fn is_valid_format(format: &str) -> bool {
    VALID_FORMATS.contains(&format)
}

pub fn is_valid_removed_format(format: &str) -> bool {
    VALID_REMOVED_FORMATS.contains(&format)
}

pub fn is_valid_per_page(per_page: u32) -> bool {
    (1..=MAX_PER_PAGE).contains(&per_page)
}

pub fn is_valid_page(page: u32) -> bool {
    (1..=MAX_PAGE).contains(&page)
}

/// Shared predicate for the `gay` and `lq` filters
pub fn is_valid_filter(value: u8) -> bool {
    VALID_FILTER_OPTIONS.contains(&value)
}
