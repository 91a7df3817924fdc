//! Blocking HTTP fetch core for host-runtime bridges.
//!
//! # Overview
//! Parses a URL against a fixed grammar, configures a `ureq` transport,
//! performs exactly one GET or POST, and marshals the response into plain
//! owned data. Hosts consume results through [`TaskHandle`]s resolved off
//! the calling thread, so a bridge can wrap each call in whatever
//! promise primitive its runtime provides.
//!
//! # Design
//! - `Fetcher` is stateless beyond its worker pool; every call opens and
//!   tears down its own connection. No retries, no redirects, no pooling.
//! - Parsing, execution, and offloading are separate modules with the I/O
//!   boundary explicit: `executor::execute` is the only function that
//!   touches the network.
//! - Types use owned `String` / `Vec` / map fields to simplify FFI mapping.
//! - TLS verification is structurally non-optional; builds without the
//!   `tls` feature refuse https with `TlsUnavailable` instead of
//!   downgrading.

pub mod client;
pub mod error;
pub mod executor;
pub mod http;
pub mod task;
#[cfg(feature = "tls")]
pub mod tls;
pub mod url;

pub use client::Fetcher;
pub use error::FetchError;
pub use executor::execute;
pub use http::{HttpMethod, HttpResponse, RequestSpec};
pub use task::{TaskHandle, TaskPool};
pub use url::{ParsedUrl, Scheme};
