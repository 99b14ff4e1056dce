//! Host-bundle models shared by browser and headless runtime composition.

use std::rc::Rc;

use crate::{MemoryNotificationService, MemoryPrefsStore, NotificationService, PrefsStore};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition (`localStorage`, `window.alert`).
    Browser,
    /// Headless composition with in-memory or no-op adapters (tests, previews).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Service bundle injected into every slot engine.
///
/// Adapter selection happens before this bundle crosses into `slot_runtime`, which keeps the
/// engine free of ambient globals and browser-specific types.
#[derive(Clone)]
pub struct HostServices {
    /// Flat key/value store holding one JSON blob per slot collection.
    pub prefs: Rc<dyn PrefsStore>,
    /// Sink for user-visible failures such as a full slot grid.
    pub notifications: Rc<dyn NotificationService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle from explicit adapters.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        notifications: Rc<dyn NotificationService>,
        host_strategy: HostStrategy,
    ) -> Self {
        Self {
            prefs,
            notifications,
            host_strategy,
        }
    }

    /// Builds a headless bundle over in-memory adapters.
    ///
    /// The adapters are cheap handles over shared state, so callers may keep clones to inspect
    /// what the engine wrote or notified.
    pub fn in_memory(prefs: MemoryPrefsStore, notifications: MemoryNotificationService) -> Self {
        Self::new(Rc::new(prefs), Rc::new(notifications), HostStrategy::Headless)
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
