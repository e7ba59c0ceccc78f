//! Form bridge for a JSON resource API.
//!
//! # Overview
//! Turns UI actions into one HTTP request each and a page navigation
//! afterwards: list and new-form views, create (POST), update (PUT) and
//! delete (DELETE) against `/api/v1/<type>[/<id>]`. Form values are read from
//! the page into an ordered JSON payload.
//!
//! # Design
//! - The core does no I/O. `Page` supplies element values and navigation;
//!   `Transport` (or the host itself, via `prepare_*` / `complete`) executes
//!   requests.
//! - `FlairClient` is stateless: `build_*` produces requests, `parse_response`
//!   classifies responses, `Action::next_navigation` decides reload vs.
//!   redirect independently of the status.
//! - Types use owned `String` / `Vec` fields to keep the FFI mapping simple.

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod page;
pub mod routes;
pub mod types;

pub use bridge::{Bridge, Completion, PendingAction, Transport};
pub use client::{Action, FlairClient, Navigation, Outcome};
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use page::{build_payload, read_record_id, MemoryPage, Page};
pub use routes::Routes;
pub use types::{FieldBinding, FormFields, Payload, RecordId, ResourceType};
