//! Public fetch surface for host-runtime bridges.
//!
//! # Design
//! `Fetcher` owns a [`TaskPool`] and nothing else. Each call builds a
//! `RequestSpec`, submits one blocking execution to the pool, and returns
//! the handle; the bridge resolves it however its promise primitive wants.
//! Calls share no state, so concurrent requests are fully independent.

use std::collections::HashMap;

use crate::executor;
use crate::http::{HttpResponse, RequestSpec};
use crate::task::{TaskHandle, TaskPool};

/// Async-wrapped GET/POST client.
#[derive(Debug, Default)]
pub struct Fetcher {
    pool: TaskPool,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            pool: TaskPool::new(),
        }
    }

    /// Perform a GET request. Headers are applied verbatim; the timeout is
    /// a combined budget in seconds (non-positive disables it).
    pub fn get(
        &self,
        url: &str,
        headers: HashMap<String, String>,
        timeout_seconds: f64,
    ) -> TaskHandle<HttpResponse> {
        let spec = RequestSpec::get(url, headers, timeout_seconds);
        self.pool.submit(move || executor::execute(&spec))
    }

    /// Perform a POST request with `body` sent as-is under content type
    /// "application/json".
    pub fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
        timeout_seconds: f64,
    ) -> TaskHandle<HttpResponse> {
        let spec = RequestSpec::post(url, body, headers, timeout_seconds);
        self.pool.submit(move || executor::execute(&spec))
    }
}
