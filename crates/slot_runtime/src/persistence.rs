//! Layout persistence over the host preference store.
//!
//! Each slot collection owns one storage key holding the full JSON array of its records. Writes
//! always overwrite the whole blob.

use platform_host::PrefsStore;
use serde::{de::DeserializeOwned, Serialize};

use crate::{error::SlotError, model::ItemRecord, store::ItemStore};

/// Loads the persisted records for `storage_key`.
///
/// Returns `Ok(None)` when nothing was saved yet.
///
/// # Errors
///
/// Returns [`SlotError::PersistedStateCorrupt`] when the store fails or the blob does not parse.
pub async fn load_layout<P: DeserializeOwned>(
    prefs: &dyn PrefsStore,
    storage_key: &str,
) -> Result<Option<Vec<ItemRecord<P>>>, SlotError> {
    let raw = prefs
        .load_pref(storage_key)
        .await
        .map_err(SlotError::PersistedStateCorrupt)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| SlotError::PersistedStateCorrupt(err.to_string()))
}

/// Overwrites the blob for `storage_key` with the serialized store and returns what was written.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_layout<P: Serialize>(
    prefs: &dyn PrefsStore,
    storage_key: &str,
    store: &ItemStore<P>,
) -> Result<String, String> {
    let raw = store.to_json()?;
    prefs.save_pref(storage_key, &raw).await?;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::model::{ItemId, SlotId};

    #[test]
    fn missing_key_loads_as_none() {
        let prefs = MemoryPrefsStore::default();
        let loaded = block_on(load_layout::<Value>(&prefs, "widgets")).expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn corrupt_blob_is_reported_not_panicked() {
        let prefs = MemoryPrefsStore::default();
        prefs.seed("widgets", "[{\"id\":");
        let loaded = block_on(load_layout::<Value>(&prefs, "widgets"));
        assert!(matches!(loaded, Err(SlotError::PersistedStateCorrupt(_))));
    }

    #[test]
    fn saved_layout_loads_back() {
        let prefs = MemoryPrefsStore::default();
        let mut store = ItemStore::default();
        store
            .insert(ItemRecord::new(
                ItemId(1),
                json!({ "name": "Ex", "url": "https://example.com" }),
                SlotId::new("s3"),
            ))
            .expect("insert");

        let written = block_on(save_layout(&prefs, "shortcuts", &store)).expect("save");
        assert_eq!(prefs.raw("shortcuts"), Some(written));

        let loaded = block_on(load_layout::<Value>(&prefs, "shortcuts"))
            .expect("load")
            .expect("present");
        assert_eq!(loaded, store.records().to_vec());
    }
}
