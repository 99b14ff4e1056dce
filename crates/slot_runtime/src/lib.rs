//! Slot-based layout runtime for new-tab dashboards.
//!
//! A slot collection is a fixed grid of named placeholders. Items (widgets, shortcuts, bookmarks)
//! are opaque payloads placed into those slots, rendered through an injected
//! [`ItemFactory`](factory::ItemFactory), dragged, swapped, and persisted as one JSON blob per
//! collection.

pub mod components;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod factory;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod registry;
pub mod store;

pub use components::SlotGrid;
pub use config::{SlotConfig, SlotEngineConfig};
pub use drag::{DragDropAdapter, PointerInput};
pub use engine::SlotEngine;
pub use error::SlotError;
pub use factory::{FactoryFuture, ItemControls, ItemFactory, ItemMount, RenderableItem};
pub use model::*;
pub use persistence::{load_layout, save_layout};
pub use reducer::{reduce_slots, SlotAction, SlotEffect, SlotLayout};
pub use registry::SlotRegistry;
pub use store::{ItemStore, RestoreReport};
