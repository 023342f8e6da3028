//! Request and response values passed through the router.

use std::fmt;

use bytes::Bytes;
use reqwest::Url;
use thiserror::Error;

/// Errors from the network transport.
///
/// Only transport-level failures are errors. A response with any HTTP status
/// (including 404 or 500) is a successful fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request URL could not be parsed or resolved.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// An outgoing asset request.
///
/// Wraps an absolute URL. The fragment is dropped because it never reaches
/// the server and must not split cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    url: Url,
}

impl AssetRequest {
    /// Wrap an already-parsed URL.
    pub fn new(mut url: Url) -> Self {
        url.set_fragment(None);
        Self { url }
    }

    /// Parse an absolute URL.
    pub fn parse(url: &str) -> Result<Self, FetchError> {
        Url::parse(url)
            .map(Self::new)
            .map_err(|e| FetchError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Resolve a path (or absolute URL) against an origin.
    ///
    /// Manifest entries such as `/index.html` are resolved this way.
    pub fn resolve(origin: &Url, path: &str) -> Result<Self, FetchError> {
        origin
            .join(path)
            .map(Self::new)
            .map_err(|e| FetchError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Key under which this request's response is cached.
    pub fn cache_key(&self) -> &str {
        self.url.as_str()
    }

    /// URL path component, e.g. `/textures/rock.ktx2`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Whether this request goes over HTTP(S).
    pub fn is_network_scheme(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }
}

impl fmt::Display for AssetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// A response value, from the network, a cache store, or synthesized.
///
/// Cloning is cheap: the body is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    status: u16,
    content_type: Option<String>,
    body: Bytes,
}

impl AssetResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A `200 OK` response.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// A synthesized `404` response with a plain-text body.
    pub fn not_found(message: &'static str) -> Self {
        Self::new(404, Bytes::from_static(message.as_bytes())).with_content_type("text/plain")
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
