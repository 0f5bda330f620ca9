//! Stateless request factory and response parser for the echo service.
//!
//! # Design
//! `HttpBinClient` holds only an `Endpoint` and carries no mutable state
//! between calls. Building a request (`build_request`) and reading the reply
//! (`parse_response`) are separate steps; the caller executes the HTTP
//! round-trip in between, usually through a `Transport`. `HttpBinRequest` is
//! the same factory packaged as a value, for code that passes requests
//! around through `AsHttpRequest`.

use tracing::warn;

use crate::encoding::JsonParameterEncoder;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{EchoResponse, HttpBinParameters};

/// Anything that can produce a ready-to-send `HttpRequest`.
pub trait AsHttpRequest {
    fn as_http_request(&self) -> Result<HttpRequest>;
}

impl AsHttpRequest for HttpRequest {
    fn as_http_request(&self) -> Result<HttpRequest> {
        Ok(self.clone())
    }
}

/// A logical echo call: a method and the parameters to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBinRequest {
    pub method: HttpMethod,
    pub parameters: HttpBinParameters,
}

impl HttpBinRequest {
    /// Call with the default parameters.
    pub fn new(method: HttpMethod) -> Self {
        Self::with_parameters(method, HttpBinParameters::default())
    }

    pub fn with_parameters(method: HttpMethod, parameters: HttpBinParameters) -> Self {
        Self { method, parameters }
    }

    /// Build against an endpoint other than the public one.
    pub fn build_for(&self, endpoint: &Endpoint) -> Result<HttpRequest> {
        HttpBinClient::new(endpoint.clone()).build_request(self.method, &self.parameters)
    }
}

impl AsHttpRequest for HttpBinRequest {
    fn as_http_request(&self) -> Result<HttpRequest> {
        self.build_for(Endpoint::httpbin())
    }
}

/// Synchronous, stateless client for the echo service.
#[derive(Debug, Clone, Default)]
pub struct HttpBinClient {
    endpoint: Endpoint,
    encoder: JsonParameterEncoder,
}

impl HttpBinClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            encoder: JsonParameterEncoder::new(),
        }
    }

    /// Use a different encoder, e.g. `JsonParameterEncoder::pretty()`.
    pub fn with_encoder(mut self, encoder: JsonParameterEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `method` against its echo route with `parameters` as a JSON body.
    ///
    /// Pure and deterministic: identical inputs give identical URL, method,
    /// headers and body bytes.
    pub fn build_request<P>(&self, method: HttpMethod, parameters: &P) -> Result<HttpRequest>
    where
        P: serde::Serialize + ?Sized,
    {
        let request = self.endpoint.request_for(method).build();
        self.encoder.encode(parameters, request)
    }

    /// Check for a 2xx status, then decode the echoed request.
    pub fn parse_response(&self, response: HttpResponse) -> Result<EchoResponse> {
        check_status(&response)?;
        EchoResponse::from_slice(&response.body)
    }
}

/// Map non-success status codes to `Error::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let body = String::from_utf8_lossy(&response.body).into_owned();
    warn!(status = response.status, "echo service returned an error status");
    Err(Error::HttpStatus {
        status: response.status,
        body,
    })
}
