//! Fixed set of slot placeholders materialized once from a [`SlotConfig`].

use crate::{config::SlotConfig, model::SlotId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: Vec<SlotId>,
}

impl SlotRegistry {
    /// Materializes `count` slot ids in declaration order.
    pub fn from_config(config: &SlotConfig) -> Self {
        let slots = (0..config.count)
            .map(|offset| {
                let index = u64::from(config.start_index) + u64::from(offset);
                SlotId::new(format!("{}{}", config.id_prefix, index))
            })
            .collect();
        Self { slots }
    }

    pub fn slot_ids(&self) -> &[SlotId] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot_id: &SlotId) -> bool {
        self.slots.contains(slot_id)
    }

    /// First slot, in declaration order, for which `is_occupied` is false.
    pub fn find_empty_slot(&self, is_occupied: impl Fn(&SlotId) -> bool) -> Option<&SlotId> {
        self.slots.iter().find(|slot| !is_occupied(slot))
    }
}
