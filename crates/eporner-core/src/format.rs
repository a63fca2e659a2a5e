//! Display helpers for video metadata

/// Formats a duration in seconds as `m:ss`, or `h:mm:ss` from one hour up
///
/// # Example
/// ```
/// use eporner_core::format::format_duration;
/// assert_eq!(format_duration(95), "1:35");
/// assert_eq!(format_duration(3725), "1:02:05");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Formats a view count with a `K` or `M` suffix
///
/// # Example
/// ```
/// use eporner_core::format::format_views;
/// assert_eq!(format_views(999), "999");
/// assert_eq!(format_views(1500), "1.5K");
/// assert_eq!(format_views(2_340_000), "2.3M");
/// ```
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1000 {
        format!("{:.1}K", views as f64 / 1000.0)
    } else {
        views.to_string()
    }
}

/// Formats a rating with two decimals
pub fn format_rating(rate: f64) -> String {
    format!("{:.2}", rate)
}
