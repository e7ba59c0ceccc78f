//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use flair_core::{Completion, HttpMethod, Navigation, Outcome, RequestOptions};

/// Opaque handle to a `FlairClient`.
pub struct FfiFlairClient {
    pub(crate) inner: flair_core::FlairClient,
}

/// Opaque handle to a `Payload` being filled by the host.
pub struct FfiPayload {
    pub(crate) inner: flair_core::Payload,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Fetch options for the request. The strings are static: never free them.
#[repr(C)]
pub struct FfiRequestOptions {
    pub mode: *const c_char,
    pub cache: *const c_char,
    pub credentials: *const c_char,
    pub redirect: *const c_char,
}

impl From<RequestOptions> for FfiRequestOptions {
    fn from(o: RequestOptions) -> Self {
        FfiRequestOptions {
            mode: static_c_str(o.mode),
            cache: static_c_str(o.cache),
            credentials: static_c_str(o.credentials),
            redirect: static_c_str(o.redirect),
        }
    }
}

/// Map a known option value to a static C string; unknown values become null.
fn static_c_str(value: &str) -> *const c_char {
    let s: &'static CStr = match value {
        "same-origin" => c"same-origin",
        "no-cache" => c"no-cache",
        "follow" => c"follow",
        _ => return std::ptr::null(),
    };
    s.as_ptr()
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `flair_build_*` functions. The C caller executes the request and
/// passes the response to `flair_complete`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub options: FfiRequestOptions,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    ///
    /// Returns null if any string contains an interior NUL.
    pub(crate) fn from_core(req: flair_core::HttpRequest) -> *mut Self {
        let Ok(path) = CString::new(req.path) else {
            return std::ptr::null_mut();
        };
        let body = match req.body.map(CString::new).transpose() {
            Ok(body) => body,
            Err(_) => return std::ptr::null_mut(),
        };
        let headers: Result<Vec<(CString, CString)>, _> = req
            .headers
            .into_iter()
            .map(|(k, v)| Ok::<_, std::ffi::NulError>((CString::new(k)?, CString::new(v)?)))
            .collect();
        let Ok(headers) = headers else {
            return std::ptr::null_mut();
        };

        let headers_len = headers.len() as u32;
        let headers = if headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: k.into_raw(),
                    value: v.into_raw(),
                })
                .collect();
            // len == capacity so flair_free_request can rebuild the Vec.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: path.into_raw(),
            headers,
            headers_len,
            body: body.map_or(std::ptr::null_mut(), CString::into_raw),
            options: req.options.into(),
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to `flair_complete`. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Completion types
// ---------------------------------------------------------------------------

/// Which action a response belongs to. Passed to `flair_complete` as `u32`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiActionKind {
    Create = 0,
    Update = 1,
    Delete = 2,
}

impl TryFrom<u32> for FfiActionKind {
    type Error = u32;

    fn try_from(v: u32) -> Result<Self, u32> {
        match v {
            0 => Ok(FfiActionKind::Create),
            1 => Ok(FfiActionKind::Update),
            2 => Ok(FfiActionKind::Delete),
            other => Err(other),
        }
    }
}

/// How the action ended.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiOutcome {
    Success = 0,
    HttpError = 1,
    NetworkFailure = 2,
    NullArg = 3,
    InvalidArg = 4,
    Panic = 5,
}

/// What the host must do with its page.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiNavigationKind {
    None = 0,
    Reload = 1,
    Navigate = 2,
}

/// Result envelope for `flair_complete`.
///
/// `path` is set only when `navigation` is `Navigate`. `error_message` is set
/// for `NetworkFailure`, `NullArg`, `InvalidArg` and `Panic`.
#[repr(C)]
pub struct FfiCompletion {
    pub outcome: FfiOutcome,
    pub http_status: u16,
    pub navigation: FfiNavigationKind,
    pub path: *mut c_char,
    pub error_message: *mut c_char,
}

impl FfiCompletion {
    pub(crate) fn from_core(completion: Completion) -> *mut Self {
        let (outcome, http_status) = match completion.outcome {
            Outcome::Success { status } => (FfiOutcome::Success, status),
            Outcome::HttpError { status, .. } => (FfiOutcome::HttpError, status),
        };
        let (navigation, path) = match completion.navigation {
            Navigation::Reload => (FfiNavigationKind::Reload, std::ptr::null_mut()),
            Navigation::Navigate(path) => (FfiNavigationKind::Navigate, c_string_or_null(path)),
        };
        Box::into_raw(Box::new(FfiCompletion {
            outcome,
            http_status,
            navigation,
            path,
            error_message: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn failure(outcome: FfiOutcome, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiCompletion {
            outcome,
            http_status: 0,
            navigation: FfiNavigationKind::None,
            path: std::ptr::null_mut(),
            error_message: c_string_or_null(msg),
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiOutcome::NullArg, &format!("null argument: {name}"))
    }
}

/// Owned C string, or null if `s` has an interior NUL.
pub(crate) fn c_string_or_null(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw)
}
