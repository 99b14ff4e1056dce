//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for slot-layout persistence
//! (`localStorage`), user-visible notices (`window.alert`), and the DOM
//! hit-testing used by drag/drop glue. Every browser call is gated on `target_arch = "wasm32"`
//! and degrades to an inert fallback elsewhere so the workspace tests run natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod dom;
pub mod notifications;
pub mod storage;

pub use adapters::{
    build_host_services, notification_service, prefs_store, selected_host_strategy,
    NotificationServiceAdapter, PrefsStoreAdapter,
};
pub use dom::{
    closest_attribute, drop_target, slot_id_at_point, try_set_pointer_capture, HitCandidate,
    ITEM_ID_ATTRIBUTE, SLOT_ID_ATTRIBUTE,
};
pub use notifications::WebAlertService;
pub use storage::local_prefs::WebPrefsStore;
