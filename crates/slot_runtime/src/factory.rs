//! Rendering capability consumed by the slot engine.
//!
//! The engine never looks inside a payload. It hands the payload to an [`ItemFactory`], receives
//! an opaque [`RenderableItem`], and drives that item only through the uniform placement, drag,
//! and controls hooks below. Widget, shortcut and bookmark renderers all plug in the same way.

use std::{future::Future, pin::Pin};

use crate::model::{ItemId, Motion, PixelOffset, SlotId};

/// Object-safe boxed future used by factory and item hooks.
pub type FactoryFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Where and how a rendered item should appear.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMount {
    pub slot_id: SlotId,
    /// Selector resolving the slot placeholder the item attaches under.
    pub slot_selector: String,
    /// Class the item root must carry for styling and hit-testing.
    pub marker_class: String,
    pub offset: PixelOffset,
    pub motion: Motion,
}

/// Uniform controls the engine attaches to every item regardless of its kind.
///
/// In the browser the item root carries `data-item-id` with [`ItemControls::item_id`] and the
/// handle element carries `data-drag-handle`; the grid reads both on pointerdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemControls {
    pub item_id: ItemId,
    /// The item exposes a drag handle the drag adapter may arm.
    pub draggable: bool,
    /// The item exposes a remove affordance.
    pub removable: bool,
}

/// A rendered projection of one item record.
pub trait RenderableItem {
    /// Attaches the item under the slot named by `mount`, at the given offset.
    fn mount(&mut self, mount: &ItemMount);

    /// Applies a live pixel offset (free drag) without changing slots.
    fn set_offset(&mut self, offset: PixelOffset);

    /// Toggles the "dragging" visual state.
    fn set_dragging(&mut self, dragging: bool);

    /// Wires the uniform drag/remove controls.
    fn attach_controls(&mut self, controls: &ItemControls);

    /// Plays the exit transition before the item is disposed.
    fn exit_transition(&mut self) -> FactoryFuture<'_, ()> {
        Box::pin(async {})
    }

    fn has_drag_handle(&self) -> bool {
        true
    }

    fn has_remove_control(&self) -> bool {
        true
    }
}

/// Creates and disposes rendered items for payloads of type `P`.
pub trait ItemFactory<P> {
    type Item: RenderableItem;

    /// Renders a new item. `None` means the factory declined the payload.
    ///
    /// Creation may await remote work (icon fetches, bookmark lookups); the engine waits for it
    /// before attaching controls or persisting.
    fn create_item<'a>(
        &'a self,
        item_id: ItemId,
        payload: &'a P,
        slot_id: &'a SlotId,
        position: PixelOffset,
    ) -> FactoryFuture<'a, Option<Self::Item>>;

    /// Releases per-item resources (timers, listeners) and detaches the node.
    fn remove_item(&self, item: Self::Item);
}
