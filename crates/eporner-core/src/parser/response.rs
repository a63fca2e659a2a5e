//! Response body normalization
//!
//! Picks a decoder from the declared content type and maps the decoded
//! [`Node`] onto [`VideoCollection`], [`Video`] or [`RemovedVideo`].

use super::json::decode_json;
use super::node::Node;
use super::xml::decode_xml;
use crate::error::Result;
use crate::types::{RemovedVideo, Video, VideoCollection};

/// Decodes a response body into the canonical structure
///
/// - Empty (or whitespace-only) body: empty mapping, never an error
/// - Content type containing `application/json`: JSON only
/// - Content type containing `xml`: XML only
/// - Anything else: JSON first, then XML; if both fail the XML error is returned
///
/// # Errors
/// Returns `Parse` if the body cannot be decoded
pub fn decode_body(body: &str, content_type: Option<&str>) -> Result<Node> {
    if body.trim().is_empty() {
        return Ok(Node::empty());
    }

    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();

    if content_type.contains("application/json") {
        return decode_json(body);
    }

    if content_type.contains("xml") {
        return decode_xml(body);
    }

    decode_json(body).or_else(|_| decode_xml(body))
}

/// Parses a search response into a page of videos
///
/// # Errors
/// - `Parse` if the body cannot be decoded
/// - `MissingField` if any video record lacks a mandatory field
pub fn parse_search(body: &str, content_type: Option<&str>) -> Result<VideoCollection> {
    let node = decode_body(body, content_type)?;
    VideoCollection::from_node(&node)
}

/// Parses a single-video response
///
/// # Returns
/// `None` when the decoded body is empty, which is how the API reports
/// a removed or unknown video
pub fn parse_video(body: &str, content_type: Option<&str>) -> Result<Option<Video>> {
    let node = decode_body(body, content_type)?;
    if node.is_empty() {
        return Ok(None);
    }
    Video::from_node(&node).map(Some)
}

/// Parses a JSON or XML removed-videos response
///
/// Every record must carry an `id`; a record without one fails the
/// whole call rather than being skipped.
pub fn parse_removed(body: &str, content_type: Option<&str>) -> Result<Vec<RemovedVideo>> {
    let node = decode_body(body, content_type)?;
    node.items().into_iter().map(RemovedVideo::from_node).collect()
}

/// Parses a plain-text removed-videos response: one id per non-blank line
pub fn parse_removed_txt(body: &str) -> Vec<RemovedVideo> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RemovedVideo::from_id)
        .collect()
}
