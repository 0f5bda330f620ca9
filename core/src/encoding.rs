//! JSON parameter encoding into request bodies.

use http::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::http::HttpRequest;

/// Writes a `Serialize` value into a request body as JSON.
///
/// Sets `Content-Type: application/json` unless the request already carries
/// a content type, in which case the caller's value is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonParameterEncoder {
    pretty: bool,
}

impl JsonParameterEncoder {
    /// Compact output, e.g. `{"property":"property"}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encode `parameters` into `request`. On error the request is dropped
    /// and nothing is handed back half-written.
    pub fn encode<P>(&self, parameters: &P, mut request: HttpRequest) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let body = if self.pretty {
            serde_json::to_vec_pretty(parameters)
        } else {
            serde_json::to_vec(parameters)
        }
        .map_err(Error::Encoding)?;

        debug!(url = %request.url, bytes = body.len(), "encoded JSON parameters");
        trace!(body = %String::from_utf8_lossy(&body), "request body");

        if !request.headers.contains_key(CONTENT_TYPE) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        request.body = Some(body);
        Ok(request)
    }
}
