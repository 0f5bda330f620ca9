//! DTOs exchanged with the echo service.
//!
//! # Design
//! `EchoResponse` mirrors the service's JSON verbatim. `data` and `form` are
//! only present when a body was sent, so they are `Option`s and a missing key
//! decodes to `None`. Every other key is required. Keys the service adds
//! beyond these (`json`, `files`, ...) are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Payload sent to the echo endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBinParameters {
    pub property: String,
}

impl HttpBinParameters {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }
}

impl Default for HttpBinParameters {
    fn default() -> Self {
        Self::new("property")
    }
}

/// The echo service's description of the request it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    pub headers: BTreeMap<String, String>,
    /// Apparent address of the caller.
    pub origin: String,
    /// Full URL the service observed.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<BTreeMap<String, String>>,
    pub args: BTreeMap<String, String>,
}

impl EchoResponse {
    /// Decode a raw response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let response: EchoResponse = serde_json::from_slice(bytes).map_err(Error::Decoding)?;
        debug!(url = %response.url, origin = %response.origin, "decoded echo response");
        Ok(response)
    }

    /// Header value as echoed back. The service canonicalizes names, so the
    /// lookup ignores ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// `data` parsed as JSON, for asserting on the echoed request body.
    pub fn data_json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.data
            .as_deref()
            .map(|d| serde_json::from_str(d).map_err(Error::Decoding))
    }
}
