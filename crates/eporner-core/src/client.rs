//! Main client API for Eporner
//!
//! Provides the high-level API combining the transport, parameter
//! validation and response normalization.

use tracing::debug;

use crate::api;
use crate::error::{EpornerError, Result, ValidationError};
use crate::iter::VideoIter;
use crate::params::{RemovedFormat, SearchParams, VideoIdParams};
use crate::parser::{parse_removed, parse_removed_txt, parse_search, parse_video};
use crate::transport::{ClientConfig, HttpTransport, RawResponse, Transport};
use crate::types::{RemovedVideo, Video, VideoCollection};

/// Main client for the Eporner v2 API
///
/// Every call is synchronous and performs at most one request. Errors are
/// returned as-is; nothing is retried.
pub struct EpornerClient<T = HttpTransport> {
    transport: T,
}

impl EpornerClient<HttpTransport> {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    /// * `config` - Base URL, timeouts and optional API key
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::with_config(config)?,
        })
    }

    /// API key sent with every request, if any
    pub fn api_key(&self) -> Option<&str> {
        self.transport.api_key()
    }
}

impl<T: Transport> EpornerClient<T> {
    /// Create a client on top of any [`Transport`]
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search for videos, returning one page of results
    ///
    /// # Errors
    /// - `Validation` if a parameter is out of range (no request is sent)
    /// - `Transport` / `Status` if the request fails
    /// - `Parse` / `MissingField` if the response cannot be normalized
    ///
    /// # Example
    /// ```no_run
    /// # fn example() -> eporner_core::Result<()> {
    /// use eporner_core::{EpornerClient, Order, SearchParams};
    /// let client = EpornerClient::new()?;
    /// let page = client.search(&SearchParams::new("cats").with_order(Order::TopRated))?;
    /// for video in &page {
    ///     println!("{}: {}", video.title, video.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn search(&self, params: &SearchParams) -> Result<VideoCollection> {
        let query = params.to_query()?;
        let response = self.fetch(api::ENDPOINT_SEARCH, &query)?;
        let collection = parse_search(&response.text(), response.content_type())?;

        debug!(
            "Search page {}/{}: {} videos",
            collection.page,
            collection.total_pages,
            collection.len()
        );
        Ok(collection)
    }

    /// Get a single video by ID
    ///
    /// # Arguments
    /// * `id` - Video ID
    /// * `params` - Lookup parameters; defaults when `None`
    ///
    /// # Returns
    /// `None` if the video has been removed
    ///
    /// # Errors
    /// - `Validation` if `id` is empty or whitespace only
    /// - `Transport` / `Status` if the request fails
    /// - `Parse` / `MissingField` if the response cannot be normalized
    ///
    /// # Example
    /// ```no_run
    /// # fn example() -> eporner_core::Result<()> {
    /// use eporner_core::EpornerClient;
    /// let client = EpornerClient::new()?;
    /// match client.get_video("IsabYDAiqXa", None)? {
    ///     Some(video) => println!("{} ({})", video.title, video.length_min),
    ///     None => println!("removed"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_video(&self, id: &str, params: Option<VideoIdParams>) -> Result<Option<Video>> {
        if id.trim().is_empty() {
            return Err(ValidationError::new("id", id, "Video ID cannot be empty").into());
        }

        let query = params.unwrap_or_default().to_query(id);
        let response = self.fetch(api::ENDPOINT_ID, &query)?;
        parse_video(&response.text(), response.content_type())
    }

    /// Get the IDs of removed videos
    ///
    /// `txt` responses are read one ID per line and skip JSON/XML decoding.
    ///
    /// # Errors
    /// - `Transport` / `Status` if the request fails
    /// - `Parse` / `MissingField` if the response cannot be normalized
    pub fn get_removed_videos(&self, format: RemovedFormat) -> Result<Vec<RemovedVideo>> {
        let query = vec![("format".to_string(), format.to_string())];
        let response = self.fetch(api::ENDPOINT_REMOVED, &query)?;

        let removed = match format {
            RemovedFormat::Txt => parse_removed_txt(&response.text()),
            RemovedFormat::Json | RemovedFormat::Xml => {
                parse_removed(&response.text(), response.content_type())?
            }
        };

        debug!("Fetched {} removed video ids", removed.len());
        Ok(removed)
    }

    /// Lazily iterate over every video matching `params`, page by page
    ///
    /// No request is made until the iterator is first advanced.
    ///
    /// # Example
    /// ```no_run
    /// # fn example() -> eporner_core::Result<()> {
    /// use eporner_core::{EpornerClient, SearchParams};
    /// let client = EpornerClient::new()?;
    /// for video in client.search_iter(&SearchParams::new("cats").with_per_page(100)).take(250) {
    ///     println!("{}", video.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_iter(&self, params: &SearchParams) -> VideoIter<'_, T> {
        VideoIter::new(self, params.clone())
    }

    fn fetch(&self, endpoint: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let response = self.transport.get(endpoint, query)?;
        if !response.is_success() {
            return Err(EpornerError::Status {
                status: response.status,
                body: response.text(),
            });
        }
        Ok(response)
    }
}
