//! The page capability: element values, navigation and reload.
//!
//! # Design
//! `Page` is everything the bridge needs from a document and its location.
//! Reading a missing element is an explicit `None`, so payload building fails
//! with `ElementNotFound` before any request exists.

use std::collections::HashMap;

use tracing::debug;

use crate::error::BridgeError;
use crate::types::{FormFields, Payload, RecordId};

/// Host page access.
pub trait Page {
    /// Current value of the input element with id `element_id`.
    fn get_value(&self, element_id: &str) -> Option<String>;

    /// Change the location to `path`. Fire-and-forget.
    fn navigate(&mut self, path: &str);

    /// Full reload of the current page.
    fn reload(&mut self);
}

impl<P: Page + ?Sized> Page for &mut P {
    fn get_value(&self, element_id: &str) -> Option<String> {
        (**self).get_value(element_id)
    }

    fn navigate(&mut self, path: &str) {
        (**self).navigate(path)
    }

    fn reload(&mut self) {
        (**self).reload()
    }
}

/// Read every bound element, in binding order.
pub fn build_payload<P: Page + ?Sized>(page: &P, fields: &FormFields) -> Result<Payload, BridgeError> {
    let mut payload = Payload::new();
    for binding in fields.iter() {
        let value = page
            .get_value(&binding.element_id)
            .ok_or_else(|| BridgeError::ElementNotFound {
                id: binding.element_id.clone(),
            })?;
        payload.insert(binding.name.clone(), value);
    }
    Ok(payload)
}

/// Read the record id from the element `id_field`.
pub fn read_record_id<P: Page + ?Sized>(page: &P, id_field: &str) -> Result<RecordId, BridgeError> {
    page.get_value(id_field)
        .map(RecordId::new)
        .ok_or_else(|| BridgeError::ElementNotFound {
            id: id_field.to_string(),
        })
}

/// In-memory page: a map of element values plus a record of every navigation
/// and reload. Used by hosts without a real document and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    values: HashMap<String, String>,
    location: Option<String>,
    history: Vec<String>,
    reloads: usize,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, element_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(element_id, value);
        self
    }

    pub fn set_value(&mut self, element_id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(element_id.into(), value.into());
    }

    /// Last location set by `navigate`.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Every path passed to `navigate`, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn reloads(&self) -> usize {
        self.reloads
    }
}

impl Page for MemoryPage {
    fn get_value(&self, element_id: &str) -> Option<String> {
        self.values.get(element_id).cloned()
    }

    fn navigate(&mut self, path: &str) {
        debug!(path, "navigate");
        self.location = Some(path.to_string());
        self.history.push(path.to_string());
    }

    fn reload(&mut self) {
        debug!("reload");
        self.reloads += 1;
    }
}
