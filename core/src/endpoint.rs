//! Base address of the echo service and URL composition against it.
//!
//! # Design
//! The public httpbin instance is a process-wide constant. It is parsed once,
//! the first time `Endpoint::httpbin()` is called, and reused afterwards.
//! Other instances (a local container, a stub server in tests) are configured
//! by constructing an `Endpoint` from their base URL.

use std::sync::LazyLock;

use tracing::debug;

use crate::error::{Error, Result};
use crate::http::{parse_absolute, HttpMethod, RequestBuilder};

/// Root address of the public echo service.
pub const HTTPBIN_BASE_URL: &str = "https://httpbin.org";

/// Path used when none is given.
pub const DEFAULT_PATH: &str = "get";

static HTTPBIN: LazyLock<Endpoint> = LazyLock::new(|| {
    Endpoint::new(HTTPBIN_BASE_URL)
        .unwrap_or_else(|e| panic!("built-in echo service base URL is malformed: {e}"))
});

/// A validated echo service base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Validate `base_url` as an absolute URL. A trailing `/` is dropped.
    ///
    /// The base may not carry a query or fragment, since paths are appended
    /// to its end.
    pub fn new(base_url: &str) -> Result<Self> {
        let uri = parse_absolute(base_url)?;
        if uri.query().is_some() || base_url.contains('?') {
            return Err(Error::invalid_url(base_url, "base URL must not have a query"));
        }
        if base_url.contains('#') {
            return Err(Error::invalid_url(base_url, "base URL must not have a fragment"));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The public httpbin endpoint.
    pub fn httpbin() -> &'static Endpoint {
        &HTTPBIN
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `path` appended as a path component.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn default_url(&self) -> String {
        self.url(DEFAULT_PATH)
    }

    /// Builder for a request to `path` with the default method and options.
    pub fn request(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(self.url(path))
    }

    /// Builder for the echo route that answers `method`, e.g. `POST /post`.
    pub fn request_for(&self, method: HttpMethod) -> RequestBuilder {
        let path = method.path_segment();
        debug!(%method, path = %path, base = %self.base_url, "building echo request");
        self.request(&path).method(method)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::httpbin().clone()
    }
}
