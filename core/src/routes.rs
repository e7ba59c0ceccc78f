//! Path rendering for the API endpoints and the list/new-form views.

use crate::config::BridgeConfig;
use crate::types::{RecordId, ResourceType};

/// Renders every path the bridge uses from a `BridgeConfig`.
///
/// View paths are always relative to the current origin; only API paths get
/// the base URL, matching where requests go versus where the page navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    api_root: String,
    list_view_prefix: String,
    new_form_prefix: String,
}

impl Routes {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            api_root: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.api_prefix.trim_end_matches('/')
            ),
            list_view_prefix: config.list_view_prefix.trim_end_matches('/').to_string(),
            new_form_prefix: config.new_form_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// `/flair/dt/<type>`
    pub fn list_view(&self, resource: &ResourceType) -> String {
        format!("{}/{resource}", self.list_view_prefix)
    }

    /// `/flair/new/<type>`
    pub fn new_form_view(&self, resource: &ResourceType) -> String {
        format!("{}/{resource}", self.new_form_prefix)
    }

    /// `/api/v1/<type>`
    pub fn collection(&self, resource: &ResourceType) -> String {
        format!("{}/{resource}", self.api_root)
    }

    /// `/api/v1/<type>/<id>`
    pub fn record(&self, resource: &ResourceType, id: &RecordId) -> String {
        format!("{}/{resource}/{id}", self.api_root)
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}
