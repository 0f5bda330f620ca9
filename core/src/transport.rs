//! The seam between request descriptors and an actual HTTP client.
//!
//! The crate never performs I/O on its own. A `Transport` takes a finished
//! `HttpRequest` and returns the raw `HttpResponse`; its error type is its
//! own and is handed back to the caller untouched. With the `ureq` feature a
//! blocking implementation backed by `ureq` is available.

use crate::http::{HttpRequest, HttpResponse};

/// Executes request descriptors.
///
/// Implementations must honor `HttpRequest::timeout`. Non-2xx statuses are
/// data, not errors: they come back in `HttpResponse::status` so the caller
/// can decide what they mean.
pub trait Transport {
    type Error: std::error::Error;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use http::header::CACHE_CONTROL;
    use tracing::debug;

    use super::Transport;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking transport on top of a `ureq` agent.
    ///
    /// A fresh agent is configured per request so the descriptor's timeout
    /// applies to exactly that call. The cache policy becomes a
    /// `Cache-Control` header unless one was set explicitly.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UreqTransport;

    impl UreqTransport {
        pub fn new() -> Self {
            Self
        }
    }

    impl Transport for UreqTransport {
        type Error = ureq::Error;

        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error> {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(request.timeout))
                .build()
                .new_agent();

            let mut builder = http::Request::builder()
                .method(request.method.as_str())
                .uri(request.url.as_str());
            if let Some(headers) = builder.headers_mut() {
                headers.extend(request.headers.clone());
                if let Some(directive) = request.cache_policy.cache_control() {
                    headers.entry(CACHE_CONTROL).or_insert(directive);
                }
            }

            debug!(method = %request.method, url = %request.url, "executing request");
            let response = match &request.body {
                Some(body) => agent.run(builder.body(body.clone())?)?,
                None => agent.run(builder.body(())?)?,
            };

            let (parts, mut body) = response.into_parts();
            let body = body.read_to_vec()?;
            debug!(status = parts.status.as_u16(), bytes = body.len(), "received response");

            Ok(HttpResponse {
                status: parts.status.as_u16(),
                headers: parts.headers,
                body,
            })
        }
    }
}
