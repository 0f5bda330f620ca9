//! Error types for httpbin request construction and response decoding.
//!
//! # Design
//! Encoding and decoding failures wrap the underlying `serde_json::Error` in
//! separate variants so callers can tell "the request could not be built"
//! from "the echoed payload did not match". Transport failures are not
//! represented here: a `Transport` returns its own error type unchanged.

use std::string::FromUtf8Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the request builders and response decoders.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parameter object could not be serialized to JSON.
    #[error("failed to encode parameters: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The response body is not valid JSON or does not match the echo schema.
    #[error("failed to decode echo response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The response body was requested as text but is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// A base or explicit URL could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A method name did not match any known HTTP method.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The echo service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True for every failure that happened while reading a response body.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_) | Self::InvalidUtf8(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_variants_are_classified() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        assert!(Error::Decoding(json_err).is_decoding());

        let utf8_err = String::from_utf8(vec![0xFF]).unwrap_err();
        assert!(Error::from(utf8_err).is_decoding());

        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        assert!(!Error::Encoding(json_err).is_decoding());
        assert!(!Error::invalid_url("nope", "no scheme").is_decoding());
    }

    #[test]
    fn status_error_displays_code_and_body() {
        let err = Error::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
