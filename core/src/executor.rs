//! Single-shot blocking request execution.
//!
//! # Design
//! Each call parses the URL, builds a fresh `ureq` agent, performs exactly
//! one exchange on the calling thread, and marshals the response. There is
//! no retry, no redirect following, and no connection reuse between calls.
//! Status codes are data: a 500 is a completed exchange, not an error.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use ureq::Agent;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpResponse, RequestSpec};
use crate::url::{ParsedUrl, Scheme};

/// Perform the single HTTP exchange described by `spec`.
///
/// Blocks the calling thread for the full connect/send/receive cycle; the
/// supplied timeout is the only bound on how long that takes. Methods other
/// than GET and POST are rejected before any I/O.
pub fn execute(spec: &RequestSpec) -> Result<HttpResponse, FetchError> {
    let parsed = crate::url::parse(&spec.url)?;
    let agent = build_agent(&parsed, spec.timeout)?;
    let target = parsed.to_string();

    debug!("{} {}", spec.method.as_str(), target);

    let result = match spec.method {
        HttpMethod::Get => {
            let mut request = agent.get(&target);
            for (key, value) in &spec.headers {
                request = request.header(key.as_str(), value.as_str());
            }
            request.call()
        }
        HttpMethod::Post => {
            let mut request = agent.post(&target).content_type("application/json");
            for (key, value) in &spec.headers {
                request = request.header(key.as_str(), value.as_str());
            }
            request.send(&spec.body[..])
        }
        other => {
            return Err(FetchError::UnsupportedMethod(other.as_str().to_string()));
        }
    };

    let mut response = result.map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        // Unique keys: a repeated header keeps its last occurrence.
        headers.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    debug!(
        "{} {} -> {} ({} bytes)",
        spec.method.as_str(),
        target,
        status,
        body.len()
    );

    Ok(HttpResponse {
        status,
        body,
        headers,
    })
}

/// Build the per-call agent: no redirects, statuses as data, and the
/// caller's timeout as a single combined budget.
///
/// For https, the TLS configuration always verifies server certificates;
/// builds without the `tls` feature refuse https outright instead of
/// downgrading.
fn build_agent(parsed: &ParsedUrl, timeout: Duration) -> Result<Agent, FetchError> {
    let timeout = (timeout > Duration::ZERO).then_some(timeout);
    let config = Agent::config_builder()
        .http_status_as_error(false)
        .max_redirects(0)
        .timeout_global(timeout);

    if parsed.scheme == Scheme::Https {
        #[cfg(feature = "tls")]
        return Ok(config
            .tls_config(crate::tls::client_config()?)
            .build()
            .new_agent());

        #[cfg(not(feature = "tls"))]
        return Err(FetchError::TlsUnavailable);
    }

    Ok(config.build().new_agent())
}
