//! Network transport for intercepted requests.
//!
//! The router and lifecycle manager talk to the network only through the
//! [`Fetcher`] trait. [`ReqwestFetcher`] is the production implementation.

mod http;
mod types;

pub use http::{Fetcher, ReqwestFetcher, DEFAULT_TIMEOUT_SECS};
pub use types::{AssetRequest, AssetResponse, FetchError};

#[cfg(test)]
pub use http::tests::{MockFetcher, MockRoute};
