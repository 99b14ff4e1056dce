//! Leptos view for one slot collection.
//!
//! The grid materializes the fixed slot placeholders once and forwards pointer gestures to the
//! engine. Items themselves are attached under the placeholders by the item factory.

use leptos::*;
use platform_host_web::{
    closest_attribute, slot_id_at_point, try_set_pointer_capture, ITEM_ID_ATTRIBUTE,
};
use wasm_bindgen::JsCast;

use crate::{
    config::SlotEngineConfig,
    drag::PointerInput,
    model::{ItemId, PointerPosition, SlotId},
    registry::SlotRegistry,
};

/// Attribute marking an item's drag handle sub-element.
pub const DRAG_HANDLE_ATTRIBUTE: &str = "data-drag-handle";

fn pointer_from_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn event_element(ev: &web_sys::PointerEvent) -> Option<web_sys::Element> {
    ev.target()?.dyn_into::<web_sys::Element>().ok()
}

#[component]
/// Renders the slot placeholders of one collection and reports pointer gestures over them.
pub fn SlotGrid(
    /// Collection configuration (slot naming scheme and container class).
    config: SlotEngineConfig,
    /// Receives every pointer gesture that starts on an item inside the grid.
    #[prop(into)]
    on_pointer: Callback<PointerInput>,
) -> impl IntoView {
    let registry = SlotRegistry::from_config(&config.slot_config);
    let pressed_item = store_value(None::<ItemId>);

    let on_pointer_down = move |ev: web_sys::PointerEvent| {
        let Some(target) = event_element(&ev) else {
            return;
        };
        let Some(item_id) = closest_attribute(&target, ITEM_ID_ATTRIBUTE)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(ItemId)
        else {
            return;
        };
        let on_handle = matches!(
            target.closest(&format!("[{DRAG_HANDLE_ATTRIBUTE}]")),
            Ok(Some(_))
        );
        if on_handle {
            try_set_pointer_capture(&ev);
            ev.prevent_default();
        }
        pressed_item.set_value(Some(item_id));
        on_pointer.call(PointerInput::Down {
            item_id,
            pointer: pointer_from_event(&ev),
            on_handle,
        });
    };
    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        on_pointer.call(PointerInput::Move {
            pointer: pointer_from_event(&ev),
        });
    };
    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_event(&ev);
        let dragged = pressed_item.get_value().map(|item_id| item_id.to_string());
        pressed_item.set_value(None);
        let target = slot_id_at_point(pointer.x, pointer.y, dragged.as_deref()).map(SlotId::new);
        on_pointer.call(PointerInput::Up { pointer, target });
    };
    let on_pointer_cancel = move |_: web_sys::PointerEvent| {
        pressed_item.set_value(None);
        on_pointer.call(PointerInput::Cancel);
    };

    view! {
        <div
            class=config.container_class.clone()
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            {registry
                .slot_ids()
                .iter()
                .map(|slot_id| {
                    view! { <div class="slot" data-slot-id=slot_id.to_string()></div> }
                })
                .collect_view()}
        </div>
    }
}
