//! Reducer actions, side-effect intents, and transition logic for one slot collection.

use crate::{
    error::SlotError,
    model::{
        DragSession, InteractionState, ItemId, ItemRecord, Motion, PixelOffset, PointerPosition,
        SlotId,
    },
    registry::SlotRegistry,
    store::ItemStore,
};

/// Registry plus store: the complete layout state of one slot collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout<P> {
    pub registry: SlotRegistry,
    pub store: ItemStore<P>,
}

impl<P> SlotLayout<P> {
    pub fn new(registry: SlotRegistry) -> Self {
        Self {
            registry,
            store: ItemStore::default(),
        }
    }

    /// First slot in declaration order without a live record.
    pub fn find_empty_slot(&self) -> Option<&SlotId> {
        self.registry
            .find_empty_slot(|slot| self.store.is_occupied(slot))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_slots`].
pub enum SlotAction<P> {
    /// Commit a freshly rendered record into its slot.
    Place(ItemRecord<P>),
    /// Mark an item busy while its exit transition plays.
    BeginRemove {
        /// Item leaving the layout.
        item_id: ItemId,
    },
    /// Delete an item's record.
    Remove {
        /// Item to delete.
        item_id: ItemId,
    },
    /// Move an item into `target`, swapping with a different occupant.
    MoveItem {
        /// Item to move.
        item_id: ItemId,
        /// Destination slot.
        target: SlotId,
    },
    /// Set an item's pixel offset inside its current slot.
    SetPosition {
        /// Item to reposition.
        item_id: ItemId,
        /// New offset.
        position: PixelOffset,
    },
    /// Start a free drag on an item.
    BeginDrag {
        /// Dragged item.
        item_id: ItemId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update the live offset of the active drag.
    UpdateDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Release the active drag, optionally over a slot.
    EndDrag {
        /// Slot under the pointer at release.
        target: Option<SlotId>,
    },
    /// Abort the active drag and restore its starting offset.
    CancelDrag,
    /// Replace an item's payload in place.
    UpdatePayload {
        /// Item to edit.
        item_id: ItemId,
        /// New payload.
        data: P,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_slots`] for the engine to execute.
pub enum SlotEffect {
    /// Persist the full layout snapshot.
    PersistLayout,
    /// Attach a rendered item under a slot at an offset.
    Mount {
        /// Item to place.
        item_id: ItemId,
        /// Destination slot.
        slot_id: SlotId,
        /// Offset inside the slot.
        position: PixelOffset,
        /// Transition style.
        motion: Motion,
    },
    /// Apply a live offset without changing slots.
    SetOffset {
        /// Item to offset.
        item_id: ItemId,
        /// New offset.
        position: PixelOffset,
    },
    /// Toggle the dragging visual state.
    SetDragging {
        /// Affected item.
        item_id: ItemId,
        /// Whether the item is being dragged.
        dragging: bool,
    },
    /// Re-create the rendered item from its updated payload.
    Rerender {
        /// Item whose payload changed.
        item_id: ItemId,
    },
}

/// Applies a [`SlotAction`] to the layout and collects resulting side effects.
///
/// This function is the only place slot occupancy changes, so the one-record-per-slot invariant
/// is enforced here and in [`ItemStore::insert`].
///
/// # Errors
///
/// Returns a [`SlotError`] when the action references an unknown item or slot, targets a busy
/// item, or would place two records in one slot. Failed actions leave the layout untouched.
pub fn reduce_slots<P>(
    layout: &mut SlotLayout<P>,
    interaction: &mut InteractionState,
    action: SlotAction<P>,
) -> Result<Vec<SlotEffect>, SlotError> {
    let mut effects = Vec::new();
    match action {
        SlotAction::Place(record) => {
            if !layout.registry.contains(&record.slot_id) {
                return Err(SlotError::UnknownSlot {
                    slot_id: record.slot_id,
                });
            }
            let mount = SlotEffect::Mount {
                item_id: record.id,
                slot_id: record.slot_id.clone(),
                position: record.position,
                motion: Motion::Instant,
            };
            layout.store.insert(record)?;
            effects.push(mount);
            effects.push(SlotEffect::PersistLayout);
        }
        SlotAction::BeginRemove { item_id } => {
            ensure_idle(interaction, item_id)?;
            find_record(layout, item_id)?;
            if interaction.dragged_item() == Some(item_id) {
                interaction.dragging = None;
            }
            interaction.removing.insert(item_id);
        }
        SlotAction::Remove { item_id } => {
            interaction.removing.remove(&item_id);
            if interaction.dragged_item() == Some(item_id) {
                interaction.dragging = None;
            }
            layout
                .store
                .remove(item_id)
                .ok_or(SlotError::ItemNotFound { item_id })?;
            effects.push(SlotEffect::PersistLayout);
        }
        SlotAction::MoveItem { item_id, target } => {
            move_item(layout, interaction, item_id, target, &mut effects)?;
            effects.push(SlotEffect::PersistLayout);
        }
        SlotAction::SetPosition { item_id, position } => {
            ensure_idle(interaction, item_id)?;
            find_record_mut(layout, item_id)?.position = position;
            effects.push(SlotEffect::SetOffset { item_id, position });
            effects.push(SlotEffect::PersistLayout);
        }
        SlotAction::BeginDrag { item_id, pointer } => {
            ensure_idle(interaction, item_id)?;
            let offset_start = find_record(layout, item_id)?.position;
            if let Some(previous) = interaction.dragging.take() {
                effects.push(SlotEffect::SetDragging {
                    item_id: previous.item_id,
                    dragging: false,
                });
            }
            interaction.dragging = Some(DragSession {
                item_id,
                pointer_start: pointer,
                offset_start,
            });
            effects.push(SlotEffect::SetDragging {
                item_id,
                dragging: true,
            });
        }
        SlotAction::UpdateDrag { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let position = session.offset_start.offset(dx, dy);
                let item_id = session.item_id;
                find_record_mut(layout, item_id)?.position = position;
                effects.push(SlotEffect::SetOffset { item_id, position });
            }
        }
        SlotAction::EndDrag { target } => {
            let Some(item_id) = interaction.dragged_item() else {
                return Ok(effects);
            };
            let origin = find_record(layout, item_id)?.slot_id.clone();
            // Releasing over the origin slot, outside every slot, or onto a slot whose occupant
            // is being removed keeps the free-drag offset in place.
            let destination = target.filter(|slot| {
                *slot != origin
                    && layout.registry.contains(slot)
                    && layout
                        .store
                        .occupant(slot)
                        .map_or(true, |other| !interaction.is_busy(other.id))
            });
            interaction.dragging = None;
            effects.push(SlotEffect::SetDragging {
                item_id,
                dragging: false,
            });
            if let Some(destination) = destination {
                move_item(layout, interaction, item_id, destination, &mut effects)?;
            }
            effects.push(SlotEffect::PersistLayout);
        }
        SlotAction::CancelDrag => {
            let Some(session) = interaction.dragging.take() else {
                return Ok(effects);
            };
            let item_id = session.item_id;
            find_record_mut(layout, item_id)?.position = session.offset_start;
            effects.push(SlotEffect::SetOffset {
                item_id,
                position: session.offset_start,
            });
            effects.push(SlotEffect::SetDragging {
                item_id,
                dragging: false,
            });
        }
        SlotAction::UpdatePayload { item_id, data } => {
            ensure_idle(interaction, item_id)?;
            find_record_mut(layout, item_id)?.data = data;
            effects.push(SlotEffect::Rerender { item_id });
            effects.push(SlotEffect::PersistLayout);
        }
    }

    Ok(effects)
}

fn move_item<P>(
    layout: &mut SlotLayout<P>,
    interaction: &InteractionState,
    item_id: ItemId,
    target: SlotId,
    effects: &mut Vec<SlotEffect>,
) -> Result<(), SlotError> {
    ensure_idle(interaction, item_id)?;
    if !layout.registry.contains(&target) {
        return Err(SlotError::UnknownSlot { slot_id: target });
    }
    let origin = find_record(layout, item_id)?.slot_id.clone();
    let other = layout
        .store
        .occupant(&target)
        .map(|record| record.id)
        .filter(|other| *other != item_id);

    if let Some(other_id) = other {
        ensure_idle(interaction, other_id)?;
        settle(layout, other_id, origin, effects)?;
    }
    settle(layout, item_id, target, effects)
}

fn settle<P>(
    layout: &mut SlotLayout<P>,
    item_id: ItemId,
    slot_id: SlotId,
    effects: &mut Vec<SlotEffect>,
) -> Result<(), SlotError> {
    let record = find_record_mut(layout, item_id)?;
    record.slot_id = slot_id.clone();
    record.position = PixelOffset::ORIGIN;
    effects.push(SlotEffect::Mount {
        item_id,
        slot_id,
        position: PixelOffset::ORIGIN,
        motion: Motion::Settle,
    });
    Ok(())
}

fn ensure_idle(interaction: &InteractionState, item_id: ItemId) -> Result<(), SlotError> {
    if interaction.is_busy(item_id) {
        return Err(SlotError::ItemBusy { item_id });
    }
    Ok(())
}

fn find_record<P>(layout: &SlotLayout<P>, item_id: ItemId) -> Result<&ItemRecord<P>, SlotError> {
    layout
        .store
        .get(item_id)
        .ok_or(SlotError::ItemNotFound { item_id })
}

fn find_record_mut<P>(
    layout: &mut SlotLayout<P>,
    item_id: ItemId,
) -> Result<&mut ItemRecord<P>, SlotError> {
    layout
        .store
        .get_mut(item_id)
        .ok_or(SlotError::ItemNotFound { item_id })
}
