//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer + length instead of
//! `Vec`, and enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface. Every pointer
//! handed out is owned by the caller until returned to `fetch_free_result`.

use std::ffi::CString;
use std::os::raw::c_char;

use fetch_core::{FetchError, Fetcher, HttpResponse};

/// Opaque handle to a `Fetcher`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiFetchClient {
    pub(crate) inner: Fetcher,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFetchResult`.
///
/// The first four mirror the core error taxonomy; the rest can only arise
/// at the boundary itself.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    UnsupportedMethod = 2,
    TlsUnavailable = 3,
    Transport = 4,
    BadHeaders = 5,
    NullArg = 6,
    Panic = 7,
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP response exposed to C.
///
/// `body` is raw bytes (not NUL-terminated); `headers` is an array of
/// `headers_len` entries.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *mut u8,
    pub body_len: u64,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

/// Result envelope for `fetch_get` / `fetch_post`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `response`
/// points to the marshaled response. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string, and `response`
/// is null.
#[repr(C)]
pub struct FfiFetchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub response: *mut FfiHttpResponse,
}

impl FfiFetchResult {
    /// Build a success result from a core response.
    pub(crate) fn ok(response: HttpResponse) -> *mut Self {
        let body_len = response.body.len() as u64;
        let body = if response.body.is_empty() {
            std::ptr::null_mut()
        } else {
            let mut bytes = response.body.into_boxed_slice();
            let ptr = bytes.as_mut_ptr();
            std::mem::forget(bytes);
            ptr
        };

        let headers_len = response.headers.len() as u32;
        let headers = if headers_len == 0 {
            std::ptr::null_mut()
        } else {
            let mut ffi_headers: Box<[FfiHeader]> = response
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: CString::new(k).unwrap().into_raw(),
                    value: CString::new(v).unwrap().into_raw(),
                })
                .collect();
            let ptr = ffi_headers.as_mut_ptr();
            std::mem::forget(ffi_headers);
            ptr
        };

        let ffi_response = Box::new(FfiHttpResponse {
            status: response.status,
            body,
            body_len,
            headers,
            headers_len,
        });
        Box::into_raw(Box::new(FfiFetchResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            response: Box::into_raw(ffi_response),
        }))
    }

    /// Build an error result from a core `FetchError`.
    pub(crate) fn from_error(err: FetchError) -> *mut Self {
        let code = match &err {
            FetchError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
            FetchError::UnsupportedMethod(_) => FfiErrorCode::UnsupportedMethod,
            FetchError::TlsUnavailable => FfiErrorCode::TlsUnavailable,
            FetchError::Transport(_) => FfiErrorCode::Transport,
        };
        Self::error(code, &err.to_string())
    }

    /// Build an error result for a malformed headers JSON string.
    pub(crate) fn bad_headers(detail: &str) -> *mut Self {
        Self::error(
            FfiErrorCode::BadHeaders,
            &format!("invalid headers JSON: {detail}"),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(context: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, &format!("panic in {context}"))
    }

    fn error(code: FfiErrorCode, message: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiFetchResult {
            error_code: code,
            error_message: CString::new(message).unwrap().into_raw(),
            response: std::ptr::null_mut(),
        }))
    }
}
