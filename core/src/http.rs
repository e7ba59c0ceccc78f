//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe requests and responses as plain data. The core builds
//! `HttpRequest` values and classifies `HttpResponse` values; whoever hosts the
//! bridge (a fetch wrapper, a C program, a test) executes the I/O.
//!
//! All fields use owned types so values can cross the FFI boundary without
//! lifetime concerns.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch-style request options. Every bridge request uses the same set; hosts
/// that execute through fetch pass these straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub mode: &'static str,
    pub cache: &'static str,
    pub credentials: &'static str,
    pub redirect: &'static str,
}

impl RequestOptions {
    pub const SAME_ORIGIN: RequestOptions = RequestOptions {
        mode: "same-origin",
        cache: "no-cache",
        credentials: "same-origin",
        redirect: "follow",
    };
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::SAME_ORIGIN
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub options: RequestOptions,
}

/// An HTTP response described as plain data.
///
/// The body is kept for logging only; the bridge never parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
