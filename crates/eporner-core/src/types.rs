//! Core data types for the Eporner API
//!
//! Immutable value objects built from decoded responses. Construction
//! either succeeds completely or fails; mandatory identity fields are
//! never defaulted, everything else is coerced permissively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api;
use crate::error::{EpornerError, Result, ValidationError};
use crate::parser::Node;

/// Thumbnail size, used both in requests and on decoded thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbSize {
    Small,
    #[default]
    Medium,
    Big,
}

impl ThumbSize {
    pub const ALL: [ThumbSize; 3] = [ThumbSize::Small, ThumbSize::Medium, ThumbSize::Big];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbSize::Small => "small",
            ThumbSize::Medium => "medium",
            ThumbSize::Big => "big",
        }
    }

    /// Nominal `(width, height)` the API serves for this size
    pub fn dimensions(&self) -> (u32, u32) {
        api::THUMB_DIMENSIONS
            .iter()
            .find(|(name, _, _)| *name == self.as_str())
            .map(|(_, width, height)| (*width, *height))
            .unwrap_or((0, 0))
    }
}

impl FromStr for ThumbSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ThumbSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .filter(|_| api::is_valid_thumb_size(s))
            .ok_or_else(|| {
                ValidationError::not_one_of("thumbsize", s, &api::VALID_THUMB_SIZES)
            })
    }
}

impl fmt::Display for ThumbSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a video thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumb {
    pub size: ThumbSize,
    pub width: u32,
    pub height: u32,
    /// Image URL
    pub src: String,
}

impl Thumb {
    /// Builds a thumbnail from a decoded record
    ///
    /// Never fails: an unknown size reads as medium, missing or
    /// unrepresentable numbers as 0 and a missing `src` as empty.
    pub fn from_node(node: &Node) -> Self {
        Self {
            size: node
                .field("size")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or_default(),
            width: u32::try_from(uint_field(node, "width")).unwrap_or(0),
            height: u32::try_from(uint_field(node, "height")).unwrap_or(0),
            src: string_field(node, "src", ""),
        }
    }

    /// Dimensions as `"<width>x<height>"`
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    pub fn is_small(&self) -> bool {
        self.size == ThumbSize::Small
    }

    pub fn is_medium(&self) -> bool {
        self.size == ThumbSize::Medium
    }

    pub fn is_big(&self) -> bool {
        self.size == ThumbSize::Big
    }
}

/// Represents a single video
///
/// `id`, `title`, `url` and `embed` are mandatory; a record missing any
/// of them cannot be turned into a `Video`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Alphanumeric video ID (e.g., "IsabYDAiqXa")
    pub id: String,

    pub title: String,

    /// Comma-separated tags
    pub keywords: String,

    pub views: u64,

    pub rate: f64,

    /// Video page URL
    pub url: String,

    /// Upload date as reported by the API (e.g., "2024-01-02 10:00:00")
    pub added: String,

    pub length_sec: u64,

    /// Preformatted duration (e.g., "12:34")
    pub length_min: String,

    /// Embeddable player URL
    pub embed: String,

    pub default_thumb: Thumb,

    pub thumbs: Vec<Thumb>,
}

impl Video {
    /// Builds a video from a decoded record
    ///
    /// # Errors
    /// Returns `MissingField` naming the first absent field out of
    /// `id`, `title`, `url`, `embed`
    pub fn from_node(node: &Node) -> Result<Self> {
        let id = required_field(node, "id")?;
        let title = required_field(node, "title")?;
        let url = required_field(node, "url")?;
        let embed = required_field(node, "embed")?;

        let default_thumb = node
            .get("default_thumb")
            .map(Thumb::from_node)
            .unwrap_or_default();
        let thumbs = node
            .get("thumbs")
            .map(|thumbs| thumbs.items().into_iter().map(Thumb::from_node).collect())
            .unwrap_or_default();

        Ok(Self {
            id,
            title,
            keywords: string_field(node, "keywords", ""),
            views: uint_field(node, "views"),
            rate: float_field(node, "rate"),
            url,
            added: string_field(node, "added", ""),
            length_sec: uint_field(node, "length_sec"),
            length_min: string_field(node, "length_min", "0:00"),
            embed,
            default_thumb,
            thumbs,
        })
    }

    /// Human-readable duration
    pub fn duration(&self) -> &str {
        &self.length_min
    }

    /// Keywords split on commas and trimmed
    pub fn keywords_list(&self) -> Vec<&str> {
        if self.keywords.is_empty() {
            return Vec::new();
        }
        self.keywords.split(',').map(str::trim).collect()
    }

    /// `<iframe>` snippet embedding this video
    pub fn embed_html(&self, width: u32, height: u32) -> String {
        format!(
            r#"<iframe src="{}" width="{}" height="{}" frameborder="0" allowfullscreen></iframe>"#,
            self.embed, width, height
        )
    }

    pub fn has_thumbs(&self) -> bool {
        !self.thumbs.is_empty()
    }

    /// First gallery thumbnail, or the default thumbnail if there are none
    pub fn first_thumb(&self) -> &Thumb {
        self.thumbs.first().unwrap_or(&self.default_thumb)
    }
}

/// One page of search results
///
/// `count` is the server-reported page size and is not required to
/// match `videos.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCollection {
    pub videos: Vec<Video>,
    pub count: u64,
    /// Offset of the first video in the full result set
    pub start: u64,
    pub per_page: u64,
    /// 1-based page number
    pub page: u64,
    /// Server-side processing time
    pub time_ms: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl VideoCollection {
    /// Builds a page from a decoded search response
    ///
    /// Missing counters read as 0 and a missing `videos` list as empty.
    ///
    /// # Errors
    /// Returns `MissingField` if any video record is incomplete
    pub fn from_node(node: &Node) -> Result<Self> {
        let videos = match node.get("videos") {
            Some(list) => list
                .items()
                .into_iter()
                .map(Video::from_node)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            videos,
            count: uint_field(node, "count"),
            start: uint_field(node, "start"),
            per_page: uint_field(node, "per_page"),
            page: uint_field(node, "page"),
            time_ms: uint_field(node, "time_ms"),
            total_count: uint_field(node, "total_count"),
            total_pages: uint_field(node, "total_pages"),
        })
    }

    /// Page with no videos and zeroed counters, on page 1
    pub fn empty() -> Self {
        Self {
            videos: Vec::new(),
            count: 0,
            start: 0,
            per_page: 0,
            page: 1,
            time_ms: 0,
            total_count: 0,
            total_pages: 0,
        }
    }

    pub fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_more_pages().then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// Number of decoded videos on this page
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Video> {
        self.videos.iter()
    }
}

impl IntoIterator for VideoCollection {
    type Item = Video;
    type IntoIter = std::vec::IntoIter<Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.videos.into_iter()
    }
}

impl<'a> IntoIterator for &'a VideoCollection {
    type Item = &'a Video;
    type IntoIter = std::slice::Iter<'a, Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.videos.iter()
    }
}

/// ID of a video that has been taken down
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovedVideo {
    pub id: String,
}

impl RemovedVideo {
    /// Builds a removed-video entry from a decoded record
    ///
    /// # Errors
    /// Returns `MissingField` if the record has no `id`
    pub fn from_node(node: &Node) -> Result<Self> {
        Ok(Self {
            id: required_field(node, "id")?,
        })
    }

    /// Builds a removed-video entry from a bare ID
    pub fn from_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for RemovedVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn required_field(node: &Node, key: &str) -> Result<String> {
    node.field(key)
        .map(str::to_string)
        .ok_or_else(|| EpornerError::MissingField(key.to_string()))
}

fn string_field(node: &Node, key: &str, default: &str) -> String {
    node.field(key).unwrap_or(default).to_string()
}

fn uint_field(node: &Node, key: &str) -> u64 {
    node.field(key).map(coerce_uint).unwrap_or(0)
}

fn float_field(node: &Node, key: &str) -> f64 {
    node.field(key)
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Reads an unsigned integer, truncating decimals; anything else is 0
fn coerce_uint(text: &str) -> u64 {
    let text = text.trim();
    if let Ok(value) = text.parse::<u64>() {
        return value;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value as u64,
        _ => 0,
    }
}
