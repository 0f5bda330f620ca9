//! HTTP request and response descriptors for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The crate
//! builds `HttpRequest` values and decodes `HttpResponse` values without ever
//! touching the network; a `Transport` supplied by the caller performs the
//! exchange. Headers use `http::HeaderMap`, so names compare
//! case-insensitively and `insert` replaces any earlier value.
//!
//! Canonical requests start from `Endpoint::request`; requests against a
//! fixed, caller-chosen URL start from `RequestBuilder::for_url`. Both share
//! the same builder and therefore the same defaults.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use http::header::{HeaderValue, IntoHeaderName};
use http::{HeaderMap, Uri};

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Query,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 10] = [
        HttpMethod::Connect,
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Query,
        HttpMethod::Trace,
    ];

    /// Upper-case wire name, e.g. `"POST"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Query => "QUERY",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Path of the echo endpoint that answers this method, e.g. `"post"`.
    pub fn path_segment(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedMethod(s.to_string()))
    }
}

impl TryFrom<HttpMethod> for http::Method {
    type Error = Error;

    /// Fails instead of substituting another method if `http` rejects the
    /// name. Every `as_str()` value is a valid token, so this succeeds.
    fn try_from(method: HttpMethod) -> Result<Self> {
        http::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|_| Error::UnsupportedMethod(method.as_str().to_string()))
    }
}

/// How the transport should treat cached responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Whatever the protocol's caching headers say.
    #[default]
    UseProtocolDefault,
    ReloadIgnoringLocalCache,
    ReturnCacheDataElseLoad,
    ReturnCacheDataDontLoad,
}

impl CachePolicy {
    /// `Cache-Control` request directive equivalent to this policy, if any.
    pub fn cache_control(&self) -> Option<HeaderValue> {
        match self {
            CachePolicy::UseProtocolDefault => None,
            CachePolicy::ReloadIgnoringLocalCache => Some(HeaderValue::from_static("no-cache")),
            CachePolicy::ReturnCacheDataElseLoad => Some(HeaderValue::from_static("max-stale")),
            CachePolicy::ReturnCacheDataDontLoad => {
                Some(HeaderValue::from_static("only-if-cached"))
            }
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RequestBuilder`, usually through `Endpoint::request` or
/// `HttpBinRequest`. A `Transport` receives it by shared reference, so the
/// descriptor it executes is exactly the one that was built.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub cache_policy: CachePolicy,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Request against a literal URL, bypassing echo path derivation.
    ///
    /// The URL is kept byte-for-byte; timeout and cache policy take the
    /// builder defaults.
    pub fn make(url: &str, method: HttpMethod, headers: HeaderMap) -> Result<Self> {
        Ok(RequestBuilder::for_url(url)?
            .method(method)
            .headers(headers)
            .build())
    }

    /// Request against the echo service's default route,
    /// `https://httpbin.org/get`.
    pub fn make_default(method: HttpMethod, headers: HeaderMap) -> Self {
        RequestBuilder::new(Endpoint::httpbin().default_url())
            .method(method)
            .headers(headers)
            .build()
    }

    /// The body as UTF-8 text.
    ///
    /// `None` covers both a missing body and a body that is not valid UTF-8.
    /// Use `decode_text` on `body` when the two must be told apart.
    pub fn body_str(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Builder for `HttpRequest` with the echo fixture's defaults: `GET`, no
/// headers, a 60 second timeout and the protocol cache policy.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    method: HttpMethod,
    headers: HeaderMap,
    timeout: Duration,
    cache_policy: CachePolicy,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub(crate) fn new(url: String) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            cache_policy: CachePolicy::default(),
            body: None,
        }
    }

    /// Start from an explicit absolute URL. The string is not normalized.
    pub fn for_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        parse_absolute(&url)?;
        Ok(Self::new(url))
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set one header, replacing any value already stored under that name.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> HttpRequest {
        HttpRequest {
            url: self.url,
            method: self.method,
            headers: self.headers,
            timeout: self.timeout,
            cache_policy: self.cache_policy,
            body: self.body,
        }
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`, then passed to
/// `HttpBinClient::parse_response` or `EchoResponse::from_slice`.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The unparsed body as text. Fails on invalid UTF-8.
    pub fn text(&self) -> Result<String> {
        decode_text(&self.body)
    }
}

/// Convert raw bytes to text, failing instead of substituting U+FFFD.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Parse `url` and require both a scheme and an authority.
pub(crate) fn parse_absolute(url: &str) -> Result<Uri> {
    let uri: Uri = url.parse().map_err(|e| Error::invalid_url(url, e))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(Error::invalid_url(url, "missing scheme or host"));
    }
    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderName, ACCEPT, CONTENT_TYPE};

    #[test]
    fn method_path_segment_is_lowercase_name() {
        assert_eq!(HttpMethod::Post.path_segment(), "post");
        assert_eq!(HttpMethod::Delete.path_segment(), "delete");
        for method in HttpMethod::ALL {
            assert_eq!(method.path_segment(), method.as_str().to_lowercase());
        }
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("GeT".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        let err = "FETCH".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod(name) if name == "FETCH"));
    }

    #[test]
    fn method_converts_to_http_method() {
        assert_eq!(http::Method::try_from(HttpMethod::Put).unwrap(), http::Method::PUT);
        for method in HttpMethod::ALL {
            let converted = http::Method::try_from(method).unwrap();
            assert_eq!(converted.as_str(), method.as_str());
        }
        assert_ne!(http::Method::try_from(HttpMethod::Query).unwrap(), http::Method::GET);
    }

    #[test]
    fn builder_applies_defaults() {
        let req = RequestBuilder::for_url("https://httpbin.org/anything")
            .unwrap()
            .build();
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.headers.is_empty());
        assert_eq!(req.timeout, Duration::from_secs(60));
        assert_eq!(req.cache_policy, CachePolicy::UseProtocolDefault);
        assert!(req.body.is_none());
    }

    #[test]
    fn headers_are_case_insensitive_last_write_wins() {
        let req = RequestBuilder::for_url("https://httpbin.org/get")
            .unwrap()
            .header(
                HeaderName::from_bytes(b"X-Trace").unwrap(),
                HeaderValue::from_static("one"),
            )
            .header(
                HeaderName::from_bytes(b"x-trace").unwrap(),
                HeaderValue::from_static("two"),
            )
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .build();
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers["X-TRACE"], "two");
    }

    #[test]
    fn make_keeps_literal_url() {
        let req = HttpRequest::make("https://httpbin.org/get", HttpMethod::Get, HeaderMap::new())
            .unwrap();
        assert_eq!(req.url, "https://httpbin.org/get");
        assert_eq!(req.method, HttpMethod::Get);

        // No normalization of odd-but-valid URLs.
        let req = HttpRequest::make(
            "https://httpbin.org//get?a=1",
            HttpMethod::Post,
            HeaderMap::new(),
        )
        .unwrap();
        assert_eq!(req.url, "https://httpbin.org//get?a=1");
        assert_eq!(req.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn make_default_targets_get_route() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let req = HttpRequest::make_default(HttpMethod::Get, headers.clone());
        assert_eq!(req.url, "https://httpbin.org/get");
        assert_eq!(req.headers, headers);
        assert_eq!(
            req,
            HttpRequest::make("https://httpbin.org/get", HttpMethod::Get, headers).unwrap()
        );
    }

    #[test]
    fn body_str_is_none_without_body_or_for_binary_body() {
        let mut req = HttpRequest::make_default(HttpMethod::Post, HeaderMap::new());
        assert_eq!(req.body_str(), None);

        req.body = Some(vec![0xFF, 0xFE]);
        assert_eq!(req.body_str(), None);
        assert!(decode_text(req.body.as_deref().unwrap()).unwrap_err().is_decoding());

        req.body = Some(b"text".to_vec());
        assert_eq!(req.body_str(), Some("text"));
    }

    #[test]
    fn make_rejects_relative_url() {
        let err = HttpRequest::make("/get", HttpMethod::Get, HeaderMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn explicit_url_accepts_timeout_and_cache_overrides() {
        let req = RequestBuilder::for_url("http://localhost:8080/status/200")
            .unwrap()
            .timeout(Duration::from_secs(5))
            .cache_policy(CachePolicy::ReloadIgnoringLocalCache)
            .build();
        assert_eq!(req.timeout, Duration::from_secs(5));
        assert_eq!(req.cache_policy, CachePolicy::ReloadIgnoringLocalCache);
    }

    #[test]
    fn cache_policy_maps_to_cache_control() {
        assert!(CachePolicy::UseProtocolDefault.cache_control().is_none());
        assert_eq!(
            CachePolicy::ReloadIgnoringLocalCache.cache_control().unwrap(),
            "no-cache"
        );
        assert_eq!(
            CachePolicy::ReturnCacheDataDontLoad.cache_control().unwrap(),
            "only-if-cached"
        );
    }

    #[test]
    fn decode_text_rejects_invalid_utf8() {
        let err = decode_text(&[0xFF, 0xFE]).unwrap_err();
        assert!(err.is_decoding());
        assert!(matches!(err, Error::InvalidUtf8(_)));
    }

    #[test]
    fn response_text_returns_exact_body() {
        let mut response = HttpResponse::new(200, "{\"ok\":true}");
        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(response.is_success());
        assert_eq!(response.text().unwrap(), "{\"ok\":true}");
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
