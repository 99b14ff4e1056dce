//! Error taxonomy for slot engine operations.

use thiserror::Error;

use crate::model::{ItemId, SlotId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by the slot reducer and engine.
pub enum SlotError {
    /// Every configured slot already holds an item.
    #[error("no empty slot available")]
    NoEmptySlot,
    /// The requested slot already holds a different item.
    #[error("slot `{slot_id}` is already occupied")]
    SlotOccupied {
        /// Occupied slot.
        slot_id: SlotId,
    },
    /// The slot id is not part of the configured registry.
    #[error("slot `{slot_id}` is not configured")]
    UnknownSlot {
        /// Unknown slot.
        slot_id: SlotId,
    },
    /// No live record has this id.
    #[error("item `{item_id}` not found")]
    ItemNotFound {
        /// Missing item.
        item_id: ItemId,
    },
    /// The item is mid-removal and rejects further transitions.
    #[error("item `{item_id}` is busy")]
    ItemBusy {
        /// Busy item.
        item_id: ItemId,
    },
    /// A record with this id is already live.
    #[error("item `{item_id}` already exists")]
    DuplicateItem {
        /// Duplicated id.
        item_id: ItemId,
    },
    /// Items cannot be created before a factory is attached.
    #[error("no item factory attached")]
    FactoryMissing,
    /// The factory returned no renderable item for the payload.
    #[error("item factory declined to render item `{item_id}`")]
    FactoryDeclined {
        /// Id reserved for the declined item.
        item_id: ItemId,
    },
    /// The persisted layout blob could not be parsed.
    #[error("persisted layout is corrupt: {0}")]
    PersistedStateCorrupt(String),
    /// Construction-time configuration is unusable.
    #[error("invalid slot configuration: {0}")]
    InvalidConfig(String),
}
