//! Error types for the form bridge.
//!
//! # Design
//! Only failures that stop an action before its continuation runs are errors:
//! a missing page element, an unencodable payload, or a request that never got
//! a response. A non-2xx status is not an error here; it is reported through
//! `Outcome::HttpError` and the reload/navigate step still happens.

use thiserror::Error;

/// Errors returned by bridge actions and request builders.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A bound input element (or the record id element) does not exist on the page.
    #[error("element not found: {id}")]
    ElementNotFound { id: String },

    /// The payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request was sent but no response came back.
    #[error("network failure: {0}")]
    Network(#[from] TransportError),
}

/// Failure reported by a `Transport` when the request could not complete at
/// the network level (connection refused, DNS, aborted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Invalid `BridgeConfig` input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must start with '/': {value:?}")]
    BadPrefix { field: &'static str, value: String },
}
