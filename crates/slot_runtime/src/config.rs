//! Construction-time configuration for one slot collection.

use serde::{Deserialize, Serialize};

use crate::{error::SlotError, model::SlotId};

/// Placeholder substituted with the slot id in [`SlotEngineConfig::slot_selector_pattern`].
pub const SLOT_ID_PLACEHOLDER: &str = "{id}";

/// Slot naming scheme: ids are `"{id_prefix}{start_index + i}"` for `i in 0..count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotConfig {
    pub id_prefix: String,
    pub start_index: u32,
    pub count: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            id_prefix: String::new(),
            start_index: 1,
            count: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotEngineConfig {
    /// Namespace of the persisted layout blob.
    pub storage_key: String,
    /// CSS selector for one slot placeholder, with `{id}` standing in for the slot id.
    pub slot_selector_pattern: String,
    /// Class every rendered item carries inside its slot.
    pub item_marker_class: String,
    /// Class applied to the grid container rendering the slots.
    pub container_class: String,
    pub slot_config: SlotConfig,
}

impl Default for SlotEngineConfig {
    fn default() -> Self {
        Self::widgets()
    }
}

impl SlotEngineConfig {
    /// Widget grid: slots `"1".."8"`.
    pub fn widgets() -> Self {
        Self {
            storage_key: "widgets".to_string(),
            slot_selector_pattern: "[data-slot-id='{id}']".to_string(),
            item_marker_class: "widget".to_string(),
            container_class: "widget-grid".to_string(),
            slot_config: SlotConfig::default(),
        }
    }

    /// Shortcut row: slots `"s1".."s8"`.
    pub fn shortcuts() -> Self {
        Self {
            storage_key: "shortcuts".to_string(),
            slot_selector_pattern: "[data-slot-id='{id}']".to_string(),
            item_marker_class: "shortcut".to_string(),
            container_class: "shortcut-grid".to_string(),
            slot_config: SlotConfig {
                id_prefix: "s".to_string(),
                ..SlotConfig::default()
            },
        }
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_slot_count(mut self, count: u32) -> Self {
        self.slot_config.count = count;
        self
    }

    /// Resolves the selector addressing `slot_id`.
    pub fn slot_selector(&self, slot_id: &SlotId) -> String {
        self.slot_selector_pattern
            .replace(SLOT_ID_PLACEHOLDER, slot_id.as_str())
    }

    /// # Errors
    ///
    /// Returns [`SlotError::InvalidConfig`] for an empty storage key, a zero slot count, or a
    /// selector pattern that cannot address individual slots.
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.storage_key.trim().is_empty() {
            return Err(SlotError::InvalidConfig(
                "storage key must not be empty".to_string(),
            ));
        }
        if self.slot_config.count == 0 {
            return Err(SlotError::InvalidConfig(
                "slot count must be at least 1".to_string(),
            ));
        }
        if !self.slot_selector_pattern.contains(SLOT_ID_PLACEHOLDER) {
            return Err(SlotError::InvalidConfig(format!(
                "slot selector pattern `{}` is missing `{SLOT_ID_PLACEHOLDER}`",
                self.slot_selector_pattern
            )));
        }
        Ok(())
    }
}
