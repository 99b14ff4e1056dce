//! DOM lookups used by the drag/drop glue.
//!
//! The layout state never reads back from the DOM; these helpers only answer "which slot or item
//! is under the pointer" for gesture handling.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Attribute carrying the slot id on every slot placeholder element.
pub const SLOT_ID_ATTRIBUTE: &str = "data-slot-id";
/// Attribute every rendered item carries with its id.
pub const ITEM_ID_ATTRIBUTE: &str = "data-item-id";

/// One element in a hit-test stack, reduced to the ids of its nearest item and slot ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitCandidate {
    /// Id from the nearest ancestor carrying [`ITEM_ID_ATTRIBUTE`].
    pub item_id: Option<String>,
    /// Id from the nearest ancestor carrying [`SLOT_ID_ATTRIBUTE`].
    pub slot_id: Option<String>,
}

/// Picks the drop slot from a topmost-first hit stack.
///
/// Elements belonging to `dragged_item` are skipped: the dragged node follows the pointer but is
/// still mounted under its origin slot, so it would otherwise always report that slot.
pub fn drop_target<I>(hits: I, dragged_item: Option<&str>) -> Option<String>
where
    I: IntoIterator<Item = HitCandidate>,
{
    hits.into_iter()
        .filter(|hit| dragged_item.is_none() || hit.item_id.as_deref() != dragged_item)
        .find_map(|hit| hit.slot_id)
}

/// Returns the slot id under the given client coordinates, ignoring the dragged item's own nodes.
pub fn slot_id_at_point(
    client_x: f64,
    client_y: f64,
    dragged_item: Option<&str>,
) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let document = web_sys::window()?.document()?;
        let hits = document
            .elements_from_point(client_x as f32, client_y as f32)
            .iter()
            .filter_map(|value| value.dyn_into::<web_sys::Element>().ok())
            .map(|element| HitCandidate {
                item_id: closest_attribute(&element, ITEM_ID_ATTRIBUTE),
                slot_id: closest_attribute(&element, SLOT_ID_ATTRIBUTE),
            });
        drop_target(hits, dragged_item)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (client_x, client_y, dragged_item);
        None
    }
}

/// Routes later pointer events of this gesture to the element that received `ev`.
#[cfg(target_arch = "wasm32")]
pub fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

/// Routes later pointer events of this gesture to the element that received `ev`.
#[cfg(not(target_arch = "wasm32"))]
pub fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Reads `attribute` from `element` or its nearest ancestor carrying it.
pub fn closest_attribute(element: &web_sys::Element, attribute: &str) -> Option<String> {
    element
        .closest(&format!("[{attribute}]"))
        .ok()
        .flatten()?
        .get_attribute(attribute)
}
