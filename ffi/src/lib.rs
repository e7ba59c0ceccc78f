//! C-ABI wrapper around `flair-core`.
//!
//! # Overview
//! Exposes the form bridge through `extern "C"` functions so a non-Rust host
//! (a web view shell, a native UI) can build requests and learn what to do
//! with its page afterwards. The host reads its own inputs into a payload,
//! executes the HTTP round-trip itself, and applies the returned navigation.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `flair_build_*` mirrors the core `build_*` methods 1:1; `flair_complete`
//!   mirrors `parse_response` + `next_navigation`.
//! - A null response pointer in `flair_complete` means the request never got
//!   a response: the completion says `NetworkFailure` and navigation `None`.
//! - The C caller owns all returned pointers and must call the matching
//!   `flair_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use flair_core::{Action, Completion, HttpResponse, RecordId, ResourceType};

use types::*;

/// Copy a C string argument. Null gives `None`; invalid UTF-8 is replaced.
fn read_c_str(p: *const c_char) -> Option<String> {
    if p.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client whose API paths start at `base_url`.
///
/// Pass `""` for same-origin relative paths. Returns null if `base_url` is
/// null or if an internal panic occurs. Free with `flair_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_client_new(base_url: *const c_char) -> *mut FfiFlairClient {
    catch_unwind(|| {
        let Some(url) = read_c_str(base_url) else {
            return std::ptr::null_mut();
        };
        let client = flair_core::FlairClient::new(&url);
        Box::into_raw(Box::new(FfiFlairClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `flair_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn flair_client_free(client: *mut FfiFlairClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Create an empty payload. Free with `flair_payload_free`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_payload_new() -> *mut FfiPayload {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiPayload {
            inner: flair_core::Payload::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Set `name` to `value`. Keys keep the order of their first push.
///
/// Returns false if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn flair_payload_push(
    payload: *mut FfiPayload,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if payload.is_null() {
            return false;
        }
        let (Some(name), Some(value)) = (read_c_str(name), read_c_str(value)) else {
            return false;
        };
        let payload = unsafe { &mut *payload };
        payload.inner.insert(name, value);
        true
    })
    .unwrap_or(false)
}

/// Free a payload. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn flair_payload_free(payload: *mut FfiPayload) {
    if !payload.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(payload) });
        });
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Path of the list view for `resource`, e.g. `/flair/dt/widget`.
///
/// Returns null on null arguments. Free with `flair_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_list_view_path(
    client: *const FfiFlairClient,
    resource: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(resource) = read_c_str(resource) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        c_string_or_null(client.inner.routes().list_view(&ResourceType::new(resource)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Path of the new-record form for `resource`, e.g. `/flair/new/widget`.
///
/// Returns null on null arguments. Free with `flair_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_new_form_path(
    client: *const FfiFlairClient,
    resource: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(resource) = read_c_str(resource) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        c_string_or_null(client.inner.routes().new_form_view(&ResourceType::new(resource)))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a POST of `payload` to the collection of `resource`.
///
/// Returns null on null arguments or if serialization fails.
/// Free with `flair_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_build_create(
    client: *const FfiFlairClient,
    resource: *const c_char,
    payload: *const FfiPayload,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || payload.is_null() {
            return std::ptr::null_mut();
        }
        let Some(resource) = read_c_str(resource) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let payload = unsafe { &*payload };
        match client
            .inner
            .build_create(&ResourceType::new(resource), &payload.inner)
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a PUT of `payload` to record `id` of `resource`.
///
/// Returns null on null arguments or if serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn flair_build_update(
    client: *const FfiFlairClient,
    resource: *const c_char,
    id: *const c_char,
    payload: *const FfiPayload,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || payload.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(resource), Some(id)) = (read_c_str(resource), read_c_str(id)) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let payload = unsafe { &*payload };
        match client.inner.build_update(
            &ResourceType::new(resource),
            &RecordId::new(id),
            &payload.inner,
        ) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a DELETE of record `id` of `resource`.
///
/// Returns null on null arguments.
#[unsafe(no_mangle)]
pub extern "C" fn flair_build_delete(
    client: *const FfiFlairClient,
    resource: *const c_char,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(resource), Some(id)) = (read_c_str(resource), read_c_str(id)) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let req = client
            .inner
            .build_delete(&ResourceType::new(resource), &RecordId::new(id));
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Classify the response to an action and say what the page should do.
///
/// `action` is an `FfiActionKind` discriminant. `id` may be null for create.
/// `response` null means the request failed at the network level.
/// Never returns null. Free with `flair_free_completion`.
#[unsafe(no_mangle)]
pub extern "C" fn flair_complete(
    client: *const FfiFlairClient,
    action: u32,
    resource: *const c_char,
    id: *const c_char,
    response: *const FfiHttpResponse,
) -> *mut FfiCompletion {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCompletion::null_arg("client");
        }
        let Some(resource) = read_c_str(resource).map(ResourceType::new) else {
            return FfiCompletion::null_arg("resource");
        };
        let kind = match FfiActionKind::try_from(action) {
            Ok(kind) => kind,
            Err(v) => {
                return FfiCompletion::failure(FfiOutcome::InvalidArg, &format!("unknown action: {v}"))
            }
        };
        let action = match kind {
            FfiActionKind::Create => Action::Create { resource },
            FfiActionKind::Update | FfiActionKind::Delete => {
                let Some(id) = read_c_str(id).map(RecordId::new) else {
                    return FfiCompletion::null_arg("id");
                };
                if kind == FfiActionKind::Update {
                    Action::Update { resource, id }
                } else {
                    Action::Delete { resource, id }
                }
            }
        };
        if response.is_null() {
            return FfiCompletion::failure(FfiOutcome::NetworkFailure, "no response");
        }

        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = HttpResponse::new(resp.status, read_c_str(resp.body).unwrap_or_default());
        FfiCompletion::from_core(Completion {
            outcome: client.inner.parse_response(core_resp),
            navigation: client.inner.next_navigation(&action),
        })
    })
    .unwrap_or_else(|_| FfiCompletion::failure(FfiOutcome::Panic, "panic in flair_complete"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `flair_build_*` function.
/// Safe to call with null. The static option strings are not freed.
#[unsafe(no_mangle)]
pub extern "C" fn flair_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers: Box<[FfiHeader]> = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiCompletion` returned by `flair_complete`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn flair_free_completion(completion: *mut FfiCompletion) {
    if completion.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let completion = unsafe { Box::from_raw(completion) };
        if !completion.path.is_null() {
            drop(unsafe { CString::from_raw(completion.path) });
        }
        if !completion.error_message.is_null() {
            drop(unsafe { CString::from_raw(completion.error_message) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn flair_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiFlairClient {
        let url = CString::new("http://localhost:3000").unwrap();
        flair_client_new(url.as_ptr())
    }

    fn payload_of(pairs: &[(&str, &str)]) -> *mut FfiPayload {
        let payload = flair_payload_new();
        for (name, value) in pairs {
            let name = CString::new(*name).unwrap();
            let value = CString::new(*value).unwrap();
            assert!(flair_payload_push(payload, name.as_ptr(), value.as_ptr()));
        }
        payload
    }

    fn as_str<'a>(p: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(p) }.to_str().unwrap()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        flair_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(flair_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        flair_client_free(std::ptr::null_mut());
    }

    #[test]
    fn payload_push_null_returns_false() {
        let payload = flair_payload_new();
        let name = CString::new("name").unwrap();
        assert!(!flair_payload_push(payload, name.as_ptr(), std::ptr::null()));
        assert!(!flair_payload_push(std::ptr::null_mut(), name.as_ptr(), name.as_ptr()));
        flair_payload_free(payload);
    }

    #[test]
    fn view_paths() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();

        let list = flair_list_view_path(client, resource.as_ptr());
        assert_eq!(as_str(list), "/flair/dt/widget");
        let new_form = flair_new_form_path(client, resource.as_ptr());
        assert_eq!(as_str(new_form), "/flair/new/widget");

        flair_free_string(list);
        flair_free_string(new_form);
        assert!(flair_list_view_path(client, std::ptr::null()).is_null());
        flair_client_free(client);
    }

    #[test]
    fn build_create_produces_post_with_ordered_body() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let payload = payload_of(&[("name", "Foo"), ("colour", "red")]);

        let req = flair_build_create(client, resource.as_ptr(), payload);
        assert!(!req.is_null());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Post);
        assert_eq!(as_str(req_ref.path), "http://localhost:3000/api/v1/widget");
        assert_eq!(as_str(req_ref.body), r#"{"name":"Foo","colour":"red"}"#);

        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(as_str(header.key), "content-type");
        assert_eq!(as_str(header.value), "application/json");

        assert_eq!(as_str(req_ref.options.mode), "same-origin");
        assert_eq!(as_str(req_ref.options.cache), "no-cache");
        assert_eq!(as_str(req_ref.options.credentials), "same-origin");
        assert_eq!(as_str(req_ref.options.redirect), "follow");

        flair_free_request(req);
        flair_payload_free(payload);
        flair_client_free(client);
    }

    #[test]
    fn build_update_targets_record() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let id = CString::new("5").unwrap();
        let payload = payload_of(&[("name", "Foo")]);

        let req = flair_build_update(client, resource.as_ptr(), id.as_ptr(), payload);
        assert!(!req.is_null());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Put);
        assert_eq!(as_str(req_ref.path), "http://localhost:3000/api/v1/widget/5");
        assert_eq!(as_str(req_ref.body), r#"{"name":"Foo"}"#);

        flair_free_request(req);
        flair_payload_free(payload);
        flair_client_free(client);
    }

    #[test]
    fn build_update_null_id_returns_null() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let payload = payload_of(&[]);
        let req = flair_build_update(client, resource.as_ptr(), std::ptr::null(), payload);
        assert!(req.is_null());
        flair_payload_free(payload);
        flair_client_free(client);
    }

    #[test]
    fn build_delete_has_no_body() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let id = CString::new("7").unwrap();

        let req = flair_build_delete(client, resource.as_ptr(), id.as_ptr());
        assert!(!req.is_null());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Delete);
        assert_eq!(as_str(req_ref.path), "http://localhost:3000/api/v1/widget/7");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 1);

        flair_free_request(req);
        flair_client_free(client);
    }

    #[test]
    fn build_null_client_returns_null() {
        let resource = CString::new("widget").unwrap();
        let id = CString::new("7").unwrap();
        assert!(flair_build_delete(std::ptr::null(), resource.as_ptr(), id.as_ptr()).is_null());
    }

    #[test]
    fn complete_update_with_500_still_reloads() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let id = CString::new("5").unwrap();
        let body = CString::new("internal error").unwrap();
        let resp = FfiHttpResponse {
            status: 500,
            body: body.as_ptr(),
        };

        let c = flair_complete(
            client,
            FfiActionKind::Update as u32,
            resource.as_ptr(),
            id.as_ptr(),
            &resp,
        );
        let c_ref = unsafe { &*c };
        assert_eq!(c_ref.outcome, FfiOutcome::HttpError);
        assert_eq!(c_ref.http_status, 500);
        assert_eq!(c_ref.navigation, FfiNavigationKind::Reload);
        assert!(c_ref.path.is_null());

        flair_free_completion(c);
        flair_client_free(client);
    }

    #[test]
    fn complete_create_navigates_to_list() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let resp = FfiHttpResponse {
            status: 201,
            body: std::ptr::null(),
        };

        let c = flair_complete(
            client,
            FfiActionKind::Create as u32,
            resource.as_ptr(),
            std::ptr::null(),
            &resp,
        );
        let c_ref = unsafe { &*c };
        assert_eq!(c_ref.outcome, FfiOutcome::Success);
        assert_eq!(c_ref.http_status, 201);
        assert_eq!(c_ref.navigation, FfiNavigationKind::Navigate);
        assert_eq!(as_str(c_ref.path), "/flair/dt/widget");

        flair_free_completion(c);
        flair_client_free(client);
    }

    #[test]
    fn complete_delete_not_found_navigates_to_list() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let id = CString::new("7").unwrap();
        let body = CString::new("").unwrap();
        let resp = FfiHttpResponse {
            status: 404,
            body: body.as_ptr(),
        };

        let c = flair_complete(
            client,
            FfiActionKind::Delete as u32,
            resource.as_ptr(),
            id.as_ptr(),
            &resp,
        );
        let c_ref = unsafe { &*c };
        assert_eq!(c_ref.outcome, FfiOutcome::HttpError);
        assert_eq!(c_ref.navigation, FfiNavigationKind::Navigate);
        assert_eq!(as_str(c_ref.path), "/flair/dt/widget");

        flair_free_completion(c);
        flair_client_free(client);
    }

    #[test]
    fn complete_without_response_is_network_failure() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();

        let c = flair_complete(
            client,
            FfiActionKind::Create as u32,
            resource.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
        );
        let c_ref = unsafe { &*c };
        assert_eq!(c_ref.outcome, FfiOutcome::NetworkFailure);
        assert_eq!(c_ref.navigation, FfiNavigationKind::None);
        assert!(!c_ref.error_message.is_null());

        flair_free_completion(c);
        flair_client_free(client);
    }

    #[test]
    fn complete_rejects_bad_arguments() {
        let client = new_client();
        let resource = CString::new("widget").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };

        let c = flair_complete(client, 9, resource.as_ptr(), std::ptr::null(), &resp);
        assert_eq!(unsafe { &*c }.outcome, FfiOutcome::InvalidArg);
        flair_free_completion(c);

        let c = flair_complete(
            client,
            FfiActionKind::Delete as u32,
            resource.as_ptr(),
            std::ptr::null(),
            &resp,
        );
        let c_ref = unsafe { &*c };
        assert_eq!(c_ref.outcome, FfiOutcome::NullArg);
        assert_eq!(as_str(c_ref.error_message), "null argument: id");
        flair_free_completion(c);

        let c = flair_complete(std::ptr::null(), 0, resource.as_ptr(), std::ptr::null(), &resp);
        assert_eq!(unsafe { &*c }.outcome, FfiOutcome::NullArg);
        flair_free_completion(c);

        flair_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        flair_free_request(std::ptr::null_mut());
        flair_free_completion(std::ptr::null_mut());
        flair_free_string(std::ptr::null_mut());
        flair_payload_free(std::ptr::null_mut());
    }
}
