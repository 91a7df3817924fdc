//! Error types for the fetch core.
//!
//! # Design
//! One terminal variant per caller-distinguishable failure. URL parsing,
//! method validation, and TLS availability each get their own variant
//! because the host runtime reports them differently; everything that goes
//! wrong on the wire collapses into `Transport` with the transport
//! library's own description.

use std::fmt;

/// Errors surfaced by URL parsing and request execution.
#[derive(Debug)]
pub enum FetchError {
    /// The URL does not match `scheme://host[:port][/path]` with an
    /// http/https scheme.
    InvalidUrl(String),

    /// The request method is neither GET nor POST. No I/O was attempted.
    UnsupportedMethod(String),

    /// The URL is https but this build has no TLS backend. No I/O was
    /// attempted.
    TlsUnavailable,

    /// The transport exchange failed: connection refused, DNS failure,
    /// timeout expiry, TLS handshake failure, or any other wire-level
    /// error, with the underlying description.
    Transport(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(detail) => write!(f, "invalid URL: {detail}"),
            FetchError::UnsupportedMethod(method) => {
                write!(f, "unsupported HTTP method: {method}")
            }
            FetchError::TlsUnavailable => {
                write!(f, "https requested but TLS support is not compiled in")
            }
            FetchError::Transport(detail) => write!(f, "request failed: {detail}"),
        }
    }
}

impl std::error::Error for FetchError {}
