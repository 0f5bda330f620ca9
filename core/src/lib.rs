//! Request fixtures and response decoding for an httpbin-style echo service.
//!
//! # Overview
//! Builds `HttpRequest` descriptors for the echo service's per-method routes
//! and decodes the JSON it sends back into `EchoResponse`, without touching
//! the network (host-does-IO pattern). The caller, usually a test, executes
//! the round-trip through a `Transport` and asserts on the decoded result.
//!
//! # Design
//! - `Endpoint` validates the base URL once; the public instance is a
//!   lazily checked constant.
//! - `HttpBinClient` is stateless. It holds an endpoint and splits each call
//!   into `build_request` and `parse_response`.
//! - `RequestBuilder` serves both canonical routes and explicit URLs, so both
//!   accept the same options.
//! - Transport errors belong to the transport and are never wrapped.
//!
//! ```
//! use httpbin_core::{AsHttpRequest, EchoResponse, HttpBinRequest, HttpMethod};
//!
//! let request = HttpBinRequest::new(HttpMethod::Post).as_http_request()?;
//! assert_eq!(request.url, "https://httpbin.org/post");
//!
//! let body = br#"{"headers":{},"origin":"1.2.3.4","url":"https://httpbin.org/post","args":{}}"#;
//! let echo = EchoResponse::from_slice(body)?;
//! assert!(echo.data.is_none());
//! # Ok::<(), httpbin_core::Error>(())
//! ```

pub mod client;
pub mod encoding;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{AsHttpRequest, HttpBinClient, HttpBinRequest};
pub use encoding::JsonParameterEncoder;
pub use endpoint::{Endpoint, HTTPBIN_BASE_URL};
pub use error::{Error, Result};
pub use crate::http::{
    decode_text, CachePolicy, HttpMethod, HttpRequest, HttpResponse, RequestBuilder,
};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{EchoResponse, HttpBinParameters};
