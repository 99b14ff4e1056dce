//! Authoritative, ordered collection of placed item records.

use serde::Serialize;

use crate::{
    error::SlotError,
    model::{ItemId, ItemRecord, SlotId},
    registry::SlotRegistry,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore<P> {
    records: Vec<ItemRecord<P>>,
    next_item_id: u64,
}

impl<P> Default for ItemStore<P> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_item_id: 1,
        }
    }
}

/// Outcome of rebuilding a store from persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoreReport {
    /// Records now live in the store.
    pub restored: usize,
    /// Records pointing at a slot absent from the current registry.
    pub dropped_stale: usize,
    /// Records repeating an id or slot already claimed by an earlier record.
    pub dropped_duplicate: usize,
}

impl<P> ItemStore<P> {
    /// Rebuilds a store from persisted records, keeping only records placeable in `registry`.
    ///
    /// The id counter advances past every parsed id, dropped ones included, so a blob that still
    /// holds a dropped record never collides with a new item.
    pub fn from_records(
        records: Vec<ItemRecord<P>>,
        registry: &SlotRegistry,
    ) -> (Self, RestoreReport) {
        let mut store = Self::default();
        let mut report = RestoreReport::default();

        for record in records {
            store.next_item_id = store.next_item_id.max(record.id.0.saturating_add(1));
            if !registry.contains(&record.slot_id) {
                leptos::logging::debug_warn!(
                    "dropping item {} for unconfigured slot {}",
                    record.id,
                    record.slot_id
                );
                report.dropped_stale += 1;
                continue;
            }
            if store.get(record.id).is_some() || store.is_occupied(&record.slot_id) {
                leptos::logging::debug_warn!(
                    "dropping duplicate item {} in slot {}",
                    record.id,
                    record.slot_id
                );
                report.dropped_duplicate += 1;
                continue;
            }
            store.records.push(record);
        }

        report.restored = store.records.len();
        (store, report)
    }

    /// Hands out the next sequential id.
    pub fn reserve_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        id
    }

    pub fn next_item_id(&self) -> ItemId {
        ItemId(self.next_item_id)
    }

    /// Appends a record, keeping ids and slot occupancy unique.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::DuplicateItem`] or [`SlotError::SlotOccupied`] without mutating.
    pub fn insert(&mut self, record: ItemRecord<P>) -> Result<(), SlotError> {
        if self.get(record.id).is_some() {
            return Err(SlotError::DuplicateItem { item_id: record.id });
        }
        if self.is_occupied(&record.slot_id) {
            return Err(SlotError::SlotOccupied {
                slot_id: record.slot_id,
            });
        }
        self.next_item_id = self.next_item_id.max(record.id.0.saturating_add(1));
        self.records.push(record);
        Ok(())
    }

    pub fn remove(&mut self, item_id: ItemId) -> Option<ItemRecord<P>> {
        let index = self.records.iter().position(|r| r.id == item_id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, item_id: ItemId) -> Option<&ItemRecord<P>> {
        self.records.iter().find(|r| r.id == item_id)
    }

    pub fn get_mut(&mut self, item_id: ItemId) -> Option<&mut ItemRecord<P>> {
        self.records.iter_mut().find(|r| r.id == item_id)
    }

    /// The record currently placed in `slot_id`.
    pub fn occupant(&self, slot_id: &SlotId) -> Option<&ItemRecord<P>> {
        self.records.iter().find(|r| &r.slot_id == slot_id)
    }

    pub fn is_occupied(&self, slot_id: &SlotId) -> bool {
        self.occupant(slot_id).is_some()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ItemRecord<P>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<P: Serialize> ItemStore<P> {
    /// Serializes the store into the persisted layout array.
    ///
    /// # Errors
    ///
    /// Returns an error when a payload fails to serialize.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.records).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SlotConfig;

    fn record(id: u64, slot: &str) -> ItemRecord<&'static str> {
        ItemRecord::new(ItemId(id), "clock", SlotId::new(slot))
    }

    #[test]
    fn insert_rejects_second_record_for_slot() {
        let mut store = ItemStore::default();
        store.insert(record(1, "1")).expect("first insert");

        assert_eq!(
            store.insert(record(2, "1")),
            Err(SlotError::SlotOccupied {
                slot_id: SlotId::new("1")
            })
        );
        assert_eq!(
            store.insert(record(1, "2")),
            Err(SlotError::DuplicateItem { item_id: ItemId(1) })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reserve_id_is_sequential_and_skips_inserted_ids() {
        let mut store = ItemStore::default();
        assert_eq!(store.reserve_id(), ItemId(1));
        store.insert(record(7, "1")).expect("insert");
        assert_eq!(store.reserve_id(), ItemId(8));
    }

    #[test]
    fn remove_returns_record_and_frees_slot() {
        let mut store = ItemStore::default();
        store.insert(record(1, "3")).expect("insert");

        let removed = store.remove(ItemId(1)).expect("removed");
        assert_eq!(removed.slot_id, SlotId::new("3"));
        assert!(!store.is_occupied(&SlotId::new("3")));
        assert_eq!(store.remove(ItemId(1)), None);
    }

    #[test]
    fn from_records_drops_stale_and_duplicate_records() {
        let registry = SlotRegistry::from_config(&SlotConfig {
            count: 4,
            ..SlotConfig::default()
        });
        let records = vec![
            record(1, "1"),
            record(2, "6"),
            record(3, "1"),
            record(1, "2"),
            record(5, "4"),
        ];

        let (store, report) = ItemStore::from_records(records, &registry);
        let kept: Vec<u64> = store.records().iter().map(|r| r.id.0).collect();

        assert_eq!(kept, vec![1, 5]);
        assert_eq!(
            report,
            RestoreReport {
                restored: 2,
                dropped_stale: 1,
                dropped_duplicate: 2,
            }
        );
        assert_eq!(store.next_item_id(), ItemId(6));
    }

    #[test]
    fn serialization_is_byte_stable() {
        let mut store = ItemStore::default();
        store.insert(record(1, "1")).expect("insert");
        store.insert(record(2, "2")).expect("insert");

        assert_eq!(store.to_json(), store.to_json());
        assert_eq!(
            store.to_json().expect("json"),
            r#"[{"id":"1","data":"clock","slotId":"1","position":{"x":0.0,"y":0.0}},{"id":"2","data":"clock","slotId":"2","position":{"x":0.0,"y":0.0}}]"#
        );
    }
}
