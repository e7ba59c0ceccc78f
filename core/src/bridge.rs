//! Drives one UI action from page read to navigation.
//!
//! # Design
//! `Bridge` owns the page, the transport and a `FlairClient`. Each action is
//! `prepare_*` (read the page, build the request), one round-trip, then
//! `complete` (log, classify, navigate). Hosts with an asynchronous network
//! call `prepare_*` and `complete` themselves around their own fetch; hosts
//! with a blocking transport call `create_record` / `update_record` /
//! `delete_record`, which do all three.
//!
//! Every action takes `&mut self`, so one bridge never has two actions in
//! flight and their navigations cannot interleave.

use tracing::{debug, error, info, instrument, warn};

use crate::client::{Action, FlairClient, Navigation, Outcome};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::page::{self, Page};
use crate::types::{FormFields, Payload, ResourceType};

/// Executes a request and hands back whatever response arrived.
///
/// Any status, including 4xx/5xx, is `Ok`. `Err` means no response.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// A request built from the page, waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub action: Action,
    pub request: HttpRequest,
}

/// Result of a finished action: what the server said and where the page went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub outcome: Outcome,
    pub navigation: Navigation,
}

pub struct Bridge<P, T> {
    page: P,
    transport: T,
    client: FlairClient,
}

impl<P: Page, T: Transport> Bridge<P, T> {
    pub fn new(page: P, transport: T) -> Self {
        Self::with_client(page, transport, FlairClient::default())
    }

    pub fn with_config(page: P, transport: T, config: &BridgeConfig) -> Self {
        Self::with_client(page, transport, FlairClient::with_config(config))
    }

    pub fn with_client(page: P, transport: T, client: FlairClient) -> Self {
        Self {
            page,
            transport,
            client,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn client(&self) -> &FlairClient {
        &self.client
    }

    pub fn into_parts(self) -> (P, T) {
        (self.page, self.transport)
    }

    pub fn navigate_to_list(&mut self, resource: &ResourceType) {
        let path = self.client.routes().list_view(resource);
        self.page.navigate(&path);
    }

    pub fn navigate_to_create_form(&mut self, resource: &ResourceType) {
        let path = self.client.routes().new_form_view(resource);
        self.page.navigate(&path);
    }

    pub fn build_payload(&self, fields: &FormFields) -> Result<Payload, BridgeError> {
        page::build_payload(&self.page, fields)
    }

    pub fn prepare_create(
        &self,
        resource: &ResourceType,
        fields: &FormFields,
    ) -> Result<PendingAction, BridgeError> {
        let payload = self.build_payload(fields)?;
        let request = self.client.build_create(resource, &payload)?;
        Ok(PendingAction {
            action: Action::Create {
                resource: resource.clone(),
            },
            request,
        })
    }

    pub fn prepare_update(
        &self,
        resource: &ResourceType,
        id_field: &str,
        fields: &FormFields,
    ) -> Result<PendingAction, BridgeError> {
        let id = page::read_record_id(&self.page, id_field)?;
        let payload = self.build_payload(fields)?;
        let request = self.client.build_update(resource, &id, &payload)?;
        Ok(PendingAction {
            action: Action::Update {
                resource: resource.clone(),
                id,
            },
            request,
        })
    }

    pub fn prepare_delete(&self, resource: &ResourceType, id_field: &str) -> Result<PendingAction, BridgeError> {
        let id = page::read_record_id(&self.page, id_field)?;
        let request = self.client.build_delete(resource, &id);
        Ok(PendingAction {
            action: Action::Delete {
                resource: resource.clone(),
                id,
            },
            request,
        })
    }

    /// Apply the continuation for a pending action.
    ///
    /// Any response, whatever its status, is logged and followed by the
    /// action's navigation. A transport failure leaves the page untouched.
    #[instrument(level = "debug", skip_all, fields(method = %pending.request.method, path = %pending.request.path))]
    pub fn complete(
        &mut self,
        pending: PendingAction,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Completion, BridgeError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "request failed, page left as is");
                return Err(BridgeError::Network(e));
            }
        };

        info!(status = response.status, "response");
        debug!(body = %response.body, "response body");

        let outcome = self.client.parse_response(response);
        if let Outcome::HttpError { status, .. } = &outcome {
            warn!(status, "non-success status, continuing");
        }

        let navigation = self.client.next_navigation(&pending.action);
        match &navigation {
            Navigation::Reload => self.page.reload(),
            Navigation::Navigate(path) => self.page.navigate(path),
        }

        Ok(Completion { outcome, navigation })
    }

    pub fn create_record(&mut self, resource: &ResourceType, fields: &FormFields) -> Result<Completion, BridgeError> {
        let pending = self.prepare_create(resource, fields)?;
        self.run(pending)
    }

    pub fn update_record(
        &mut self,
        resource: &ResourceType,
        id_field: &str,
        fields: &FormFields,
    ) -> Result<Completion, BridgeError> {
        let pending = self.prepare_update(resource, id_field, fields)?;
        self.run(pending)
    }

    pub fn delete_record(&mut self, resource: &ResourceType, id_field: &str) -> Result<Completion, BridgeError> {
        let pending = self.prepare_delete(resource, id_field)?;
        self.run(pending)
    }

    fn run(&mut self, pending: PendingAction) -> Result<Completion, BridgeError> {
        let result = self.transport.execute(&pending.request);
        self.complete(pending, result)
    }
}
