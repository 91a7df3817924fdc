//! HTTP request and response values.
//!
//! # Design
//! Requests and responses are plain owned data so they can cross thread and
//! FFI boundaries without lifetime concerns. Header maps have unique,
//! case-sensitive keys; on the response side a duplicate header key keeps
//! its last occurrence.

use std::collections::HashMap;
use std::time::Duration;

/// HTTP method for a request.
///
/// The executor only performs `Get` and `Post`; the remaining methods exist
/// so rejection is an observable outcome rather than an unrepresentable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Everything needed to perform one HTTP exchange.
///
/// Constructed by the caller and passed by reference into
/// [`crate::executor::execute`]; not retained afterwards.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    /// Request body. Empty for GET; sent as-is for POST.
    pub body: Vec<u8>,
    /// Outgoing headers, applied verbatim with keys as supplied.
    pub headers: HashMap<String, String>,
    /// Combined read/write timeout budget. `Duration::ZERO` disables it.
    pub timeout: Duration,
}

impl RequestSpec {
    pub fn get(url: &str, headers: HashMap<String, String>, timeout_seconds: f64) -> Self {
        Self {
            url: url.to_string(),
            method: HttpMethod::Get,
            body: Vec::new(),
            headers,
            timeout: timeout_from_secs(timeout_seconds),
        }
    }

    pub fn post(
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
        timeout_seconds: f64,
    ) -> Self {
        Self {
            url: url.to_string(),
            method: HttpMethod::Post,
            body,
            headers,
            timeout: timeout_from_secs(timeout_seconds),
        }
    }
}

/// An HTTP response from a successfully completed exchange.
///
/// Built exactly once per successful execution; partial or errored
/// exchanges produce a `FetchError` instead.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

/// Convert a caller-supplied timeout in seconds to a `Duration`.
///
/// Values that are not positive finite numbers (negative, NaN, infinite,
/// or unrepresentably large) disable the timeout.
pub fn timeout_from_secs(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_spec_has_no_body() {
        let spec = RequestSpec::get("http://example.com", HashMap::new(), 5.0);
        assert_eq!(spec.method, HttpMethod::Get);
        assert!(spec.body.is_empty());
        assert_eq!(spec.timeout, Duration::from_secs(5));
    }

    #[test]
    fn post_spec_carries_body_bytes() {
        let spec = RequestSpec::post(
            "http://example.com",
            b"{\"k\":1}".to_vec(),
            HashMap::new(),
            2.5,
        );
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.body, b"{\"k\":1}");
        assert_eq!(spec.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn degenerate_timeouts_are_disabled() {
        assert_eq!(timeout_from_secs(0.0), Duration::ZERO);
        assert_eq!(timeout_from_secs(-1.0), Duration::ZERO);
        assert_eq!(timeout_from_secs(f64::NAN), Duration::ZERO);
        assert_eq!(timeout_from_secs(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn method_names_round_trip() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
