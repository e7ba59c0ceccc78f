//! Stateless request builder and response classifier for the JSON API.
//!
//! # Design
//! `FlairClient` holds only its `Routes` and carries no mutable state between
//! calls. Each action is split into a `build_*` method that produces an
//! `HttpRequest` and a shared `parse_response` that classifies the
//! `HttpResponse`. What happens to the page afterwards is decided by
//! `Action::next_navigation`, which does not look at the response at all: a
//! 404 or 500 reloads or redirects exactly like a 200.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::routes::Routes;
use crate::types::{Payload, RecordId, ResourceType};

/// Synchronous, stateless client for the `/api/v1` resource endpoints.
#[derive(Debug, Clone, Default)]
pub struct FlairClient {
    routes: Routes,
}

impl FlairClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(&BridgeConfig::with_base_url(base_url))
    }

    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            routes: Routes::new(config),
        }
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn build_create(&self, resource: &ResourceType, payload: &Payload) -> Result<HttpRequest, BridgeError> {
        let body = serde_json::to_string(payload)?;
        Ok(json_request(HttpMethod::Post, self.routes.collection(resource), Some(body)))
    }

    pub fn build_update(
        &self,
        resource: &ResourceType,
        id: &RecordId,
        payload: &Payload,
    ) -> Result<HttpRequest, BridgeError> {
        let body = serde_json::to_string(payload)?;
        Ok(json_request(HttpMethod::Put, self.routes.record(resource, id), Some(body)))
    }

    pub fn build_delete(&self, resource: &ResourceType, id: &RecordId) -> HttpRequest {
        json_request(HttpMethod::Delete, self.routes.record(resource, id), None)
    }

    /// Classify a response. Never fails: the body is not parsed.
    pub fn parse_response(&self, response: HttpResponse) -> Outcome {
        if response.is_success() {
            Outcome::Success {
                status: response.status,
            }
        } else {
            Outcome::HttpError {
                status: response.status,
                body: response.body,
            }
        }
    }

    /// Where the page goes once `action` has a response.
    pub fn next_navigation(&self, action: &Action) -> Navigation {
        action.next_navigation(&self.routes)
    }
}

/// Every request carries the JSON content type, including DELETE.
fn json_request(method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body,
        options: RequestOptions::SAME_ORIGIN,
    }
}

/// What the server said, for the caller's information only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx.
    Success { status: u16 },

    /// Any other status. The continuation has still run.
    HttpError { status: u16, body: String },
}

impl Outcome {
    pub fn status(&self) -> u16 {
        match self {
            Outcome::Success { status } | Outcome::HttpError { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// A mutating action against one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create { resource: ResourceType },
    Update { resource: ResourceType, id: RecordId },
    Delete { resource: ResourceType, id: RecordId },
}

impl Action {
    pub fn resource(&self) -> &ResourceType {
        match self {
            Action::Create { resource }
            | Action::Update { resource, .. }
            | Action::Delete { resource, .. } => resource,
        }
    }

    /// Update reloads in place; create and delete go back to the list view.
    pub fn next_navigation(&self, routes: &Routes) -> Navigation {
        match self {
            Action::Update { .. } => Navigation::Reload,
            Action::Create { resource } | Action::Delete { resource, .. } => {
                Navigation::Navigate(routes.list_view(resource))
            }
        }
    }
}

/// Page side effect applied after a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Reload,
    Navigate(String),
}
