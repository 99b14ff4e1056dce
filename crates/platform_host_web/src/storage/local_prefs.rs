//! `localStorage`-backed preference store implementation.
//!
//! Slot layouts are small JSON arrays written on every user action, which fits the synchronous
//! `localStorage` API well. The adapter still implements the async [`PrefsStore`] contract so the
//! engine stays host-agnostic.

use platform_host::{PrefsStore, PrefsStoreFuture};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPrefsStore {
    namespace: Option<&'static str>,
}

impl WebPrefsStore {
    /// Store that writes keys verbatim.
    pub const fn new() -> Self {
        Self { namespace: None }
    }

    /// Store that prefixes every key with `"{namespace}."`, so two pages sharing an origin do not
    /// overwrite each other's layouts.
    pub const fn namespaced(namespace: &'static str) -> Self {
        Self {
            namespace: Some(namespace),
        }
    }

    /// Resolves the physical `localStorage` key for a logical key.
    pub fn storage_key(self, key: &str) -> String {
        match self.namespace {
            Some(namespace) => format!("{namespace}.{key}"),
            None => key.to_string(),
        }
    }

    /// Loads a raw JSON string for a preference key.
    pub fn load_json(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()?;
            storage.get_item(&self.storage_key(key)).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Saves a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (quota exceeded).
    pub fn save_json(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&self.storage_key(key), raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl PrefsStore for WebPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load_json(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_json(key, raw_json) })
    }
}
