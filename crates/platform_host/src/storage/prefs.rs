//! Flat preference storage contracts and adapters.
//!
//! Every slot collection persists exactly one JSON text blob under its storage key. Writes are
//! whole-blob overwrites, so the contract has no partial, merge, or delete operations.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service holding one JSON text blob per key.
pub trait PrefsStore {
    /// Reads the blob stored under `key`, or `None` when nothing was written yet.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the blob stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store for headless hosts: reads nothing, accepts every write.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory blob store.
///
/// Clones share the same blobs and write counter, which lets a test drop one engine and boot a
/// fresh one over the same "disk".
pub struct MemoryPrefsStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryPrefsStore {
    /// Returns the raw stored text for `key` without going through the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    /// Seeds a raw value without counting it as a write (corrupt or legacy blobs).
    pub fn seed(&self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.blobs.borrow_mut().insert(key.into(), raw_json.into());
    }

    /// Number of [`PrefsStore::save_pref`] calls seen so far, across all keys.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.writes.set(self.writes.get() + 1);
            self.seed(key, raw_json);
            Ok(())
        })
    }
}
