//! C-ABI wrapper around `fetch-core`.
//!
//! # Overview
//! Exposes the blocking GET/POST fetch surface through `extern "C"`
//! functions so any host runtime with a C FFI can perform HTTP exchanges
//! without linking against Rust types. Calls block the calling thread; the
//! host is expected to invoke them from whatever worker abstraction backs
//! its promise primitive.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Headers cross the boundary as a JSON object string; null or empty
//!   means "no headers".
//! - A single `FfiFetchResult` envelope conveys success payloads and errors
//!   uniformly. The C caller owns all returned pointers and must release
//!   them with the matching `fetch_free_*` function.

pub mod types;

use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use fetch_core::Fetcher;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new fetch client.
///
/// Returns null if an internal panic occurs. The caller must free the
/// returned pointer with `fetch_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_client_new() -> *mut FfiFetchClient {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiFetchClient {
            inner: Fetcher::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `fetch_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_client_free(client: *mut FfiFetchClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Fetch operations
// ---------------------------------------------------------------------------

/// Perform a GET request and block until it resolves.
///
/// `headers_json` is a JSON object mapping header names to values; null or
/// empty means no headers. The caller must free the returned pointer with
/// `fetch_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_get(
    client: *const FfiFetchClient,
    url: *const c_char,
    headers_json: *const c_char,
    timeout_seconds: f64,
) -> *mut FfiFetchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFetchResult::null_arg("client");
        }
        if url.is_null() {
            return FfiFetchResult::null_arg("url");
        }
        let client = unsafe { &*client };
        let url = unsafe { CStr::from_ptr(url) }.to_str().unwrap_or("");
        let headers = match parse_headers(headers_json) {
            Ok(headers) => headers,
            Err(detail) => return FfiFetchResult::bad_headers(&detail),
        };
        match client.inner.get(url, headers, timeout_seconds).wait() {
            Ok(response) => FfiFetchResult::ok(response),
            Err(err) => FfiFetchResult::from_error(err),
        }
    })
    .unwrap_or_else(|_| FfiFetchResult::panic("fetch_get"))
}

/// Perform a POST request and block until it resolves.
///
/// `body` points to `body_len` raw bytes sent as-is with content type
/// "application/json"; null with `body_len` 0 means an empty body. The
/// caller must free the returned pointer with `fetch_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_post(
    client: *const FfiFetchClient,
    url: *const c_char,
    body: *const u8,
    body_len: u64,
    headers_json: *const c_char,
    timeout_seconds: f64,
) -> *mut FfiFetchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFetchResult::null_arg("client");
        }
        if url.is_null() {
            return FfiFetchResult::null_arg("url");
        }
        if body.is_null() && body_len > 0 {
            return FfiFetchResult::null_arg("body");
        }
        let client = unsafe { &*client };
        let url = unsafe { CStr::from_ptr(url) }.to_str().unwrap_or("");
        let headers = match parse_headers(headers_json) {
            Ok(headers) => headers,
            Err(detail) => return FfiFetchResult::bad_headers(&detail),
        };
        let body = if body.is_null() || body_len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(body, body_len as usize) }.to_vec()
        };
        match client
            .inner
            .post(url, body, headers, timeout_seconds)
            .wait()
        {
            Ok(response) => FfiFetchResult::ok(response),
            Err(err) => FfiFetchResult::from_error(err),
        }
    })
    .unwrap_or_else(|_| FfiFetchResult::panic("fetch_post"))
}

/// Parse the headers JSON string into a map. Null and blank inputs are an
/// empty map; anything else must be a JSON object of strings.
fn parse_headers(headers_json: *const c_char) -> Result<HashMap<String, String>, String> {
    if headers_json.is_null() {
        return Ok(HashMap::new());
    }
    let raw = unsafe { CStr::from_ptr(headers_json) }
        .to_str()
        .map_err(|e| e.to_string())?;
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFetchResult` returned by `fetch_get` / `fetch_post`,
/// including any marshaled response it carries. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_free_result(result: *mut FfiFetchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { std::ffi::CString::from_raw(result.error_message) });
        }
        if !result.response.is_null() {
            let response = unsafe { Box::from_raw(result.response) };
            if !response.body.is_null() && response.body_len > 0 {
                let len = response.body_len as usize;
                drop(unsafe { Vec::from_raw_parts(response.body, len, len) });
            }
            if !response.headers.is_null() && response.headers_len > 0 {
                let len = response.headers_len as usize;
                let headers = unsafe { Vec::from_raw_parts(response.headers, len, len) };
                for header in headers {
                    if !header.key.is_null() {
                        drop(unsafe { std::ffi::CString::from_raw(header.key) });
                    }
                    if !header.value.is_null() {
                        drop(unsafe { std::ffi::CString::from_raw(header.value) });
                    }
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install the logging backend, reading the level from the environment.
/// Safe to call more than once; later calls are no-ops.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_init_logger() {
    let _ = env_logger::Builder::from_default_env().try_init();
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
