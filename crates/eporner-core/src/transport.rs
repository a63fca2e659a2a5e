//! Blocking HTTP transport for the Eporner API
//!
//! The [`Transport`] trait is the single seam between the client and the
//! network. [`HttpTransport`] implements it over `reqwest`'s blocking
//! client; tests substitute their own implementation.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::api;
use crate::error::Result;
use crate::url::build_url;

const USER_AGENT: &str = concat!("eporner-core/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host requests are sent to (default: https://www.eporner.com)
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Connection timeout in seconds (default: 10)
    pub connect_timeout_secs: u64,
    /// Sent as `Authorization: Bearer <key>` when set
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            api_key: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Raw HTTP response as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are lower-cased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Successful response with the given content type and body
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        Self {
            status: 200,
            headers,
            body: body.into(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests against the API
///
/// Implementations are expected to block until the whole body has been
/// received, and to report every network-level failure as
/// [`EpornerError::Transport`](crate::EpornerError::Transport).
pub trait Transport {
    /// GET `endpoint` with the given query parameters
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<RawResponse> {
        (**self).get(endpoint, query)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<RawResponse> {
        (**self).get(endpoint, query)
    }
}

/// [`Transport`] backed by a blocking `reqwest` client
///
/// Must not be used from inside an async runtime; wrap calls in
/// `spawn_blocking` there.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Create a new transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl Transport for HttpTransport {
    fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let url = build_url(&self.base_url, endpoint, query);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.bytes()?.to_vec();

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
