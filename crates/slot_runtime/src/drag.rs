//! Pointer-gesture glue that turns raw pointer input into slot reducer actions.
//!
//! Geometry stays with the host: the adapter is told which slot (if any) is under the pointer at
//! release and only decides which intent the gesture expresses.

use crate::{
    model::{ItemId, PointerPosition, SlotId},
    reducer::SlotAction,
};

/// Pointer travel (px) before a press turns into a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Pointer pressed on a rendered item.
    Down {
        item_id: ItemId,
        pointer: PointerPosition,
        /// Whether the press landed on the item's drag handle.
        on_handle: bool,
    },
    Move {
        pointer: PointerPosition,
    },
    /// Pointer released; `target` is the hit-tested slot under the pointer.
    Up {
        pointer: PointerPosition,
        target: Option<SlotId>,
    },
    /// Gesture aborted by the platform or the user (pointercancel, Escape).
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pressed {
        item_id: ItemId,
        origin: PointerPosition,
    },
    Dragging {
        item_id: ItemId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragDropAdapter {
    threshold: f64,
    gesture: Gesture,
}

impl Default for DragDropAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragDropAdapter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            gesture: Gesture::Idle,
        }
    }

    /// Item currently being dragged past the threshold.
    pub fn active_item(&self) -> Option<ItemId> {
        match self.gesture {
            Gesture::Dragging { item_id } => Some(item_id),
            Gesture::Idle | Gesture::Pressed { .. } => None,
        }
    }

    /// Drops any in-flight gesture without emitting actions.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Advances the gesture and returns the reducer actions it implies, in order.
    pub fn translate<P>(&mut self, input: PointerInput) -> Vec<SlotAction<P>> {
        match (self.gesture, input) {
            (
                Gesture::Idle,
                PointerInput::Down {
                    item_id,
                    pointer,
                    on_handle: true,
                },
            ) => {
                self.gesture = Gesture::Pressed {
                    item_id,
                    origin: pointer,
                };
                Vec::new()
            }
            (Gesture::Pressed { item_id, origin }, PointerInput::Move { pointer }) => {
                if origin.distance_to(pointer) < self.threshold {
                    return Vec::new();
                }
                self.gesture = Gesture::Dragging { item_id };
                vec![
                    SlotAction::BeginDrag {
                        item_id,
                        pointer: origin,
                    },
                    SlotAction::UpdateDrag { pointer },
                ]
            }
            (Gesture::Dragging { .. }, PointerInput::Move { pointer }) => {
                vec![SlotAction::UpdateDrag { pointer }]
            }
            (Gesture::Dragging { .. }, PointerInput::Up { pointer, target }) => {
                self.gesture = Gesture::Idle;
                vec![
                    SlotAction::UpdateDrag { pointer },
                    SlotAction::EndDrag { target },
                ]
            }
            (Gesture::Dragging { .. }, PointerInput::Cancel) => {
                self.gesture = Gesture::Idle;
                vec![SlotAction::CancelDrag]
            }
            (Gesture::Pressed { .. }, PointerInput::Up { .. } | PointerInput::Cancel) => {
                self.gesture = Gesture::Idle;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
