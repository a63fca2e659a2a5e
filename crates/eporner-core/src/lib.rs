//! Eporner API Client Core Library
//!
//! Provides a typed, blocking client for the Eporner v2 video search API.
//!
//! # Overview
//!
//! This crate provides a complete client for the Eporner API with:
//! - Validated request parameters that can never be sent out of range
//! - Response normalization for JSON, XML and plain-text bodies
//! - A lazy iterator that walks every page of a search
//!
//! # Example
//!
//! ```no_run
//! use eporner_core::{EpornerClient, Order, Result, SearchParams, ThumbSize};
//!
//! fn main() -> Result<()> {
//!     let client = EpornerClient::new()?;
//!
//!     // One page of results
//!     let params = SearchParams::new("cats")
//!         .with_per_page(50)
//!         .with_order(Order::TopRated)
//!         .with_thumbsize(ThumbSize::Big);
//!     let page = client.search(&params)?;
//!     println!("{} results over {} pages", page.total_count, page.total_pages);
//!
//!     // Every result, fetched page by page as the loop advances
//!     for video in client.search_iter(&params).take(120) {
//!         println!("{}: {}", video.title, video.url);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Iteration stops on errors
//!
//! [`VideoIter`] treats a failed page fetch like the end of the results.
//! Use [`VideoIter::last_error`] afterwards, or call
//! [`EpornerClient::search`] directly, when the difference matters.

pub mod api;
mod client;
mod error;
pub mod format;
mod iter;
mod params;
pub mod parser;
mod transport;
mod types;
pub mod url;

// Re-export client types
pub use client::EpornerClient;
pub use iter::VideoIter;
pub use transport::{ClientConfig, HttpTransport, RawResponse, Transport};

// Re-export error types
pub use error::{BoxError, EpornerError, Result, ValidationError};

// Re-export parameter types
pub use params::{Format, Order, RemovedFormat, SearchParams, VideoIdParams};

// Re-export parser functions
pub use parser::{Node, decode_body, parse_removed, parse_removed_txt, parse_search, parse_video};

// Re-export data types
pub use types::{RemovedVideo, Thumb, ThumbSize, Video, VideoCollection};
