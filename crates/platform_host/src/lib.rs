//! Typed host-service contracts shared by the slot runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the flat preference
//! store used to persist slot layouts, the notification sink used for user-visible failures, and
//! the [`HostServices`] bundle injected into each slot engine. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod notifications;
pub mod storage;

pub use host::{HostServices, HostStrategy};
pub use notifications::service::{
    MemoryNotificationService, NoopNotificationService, Notice, NotificationFuture,
    NotificationService,
};
pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture};
