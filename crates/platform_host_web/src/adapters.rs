use std::rc::Rc;

use platform_host::{
    HostServices, HostStrategy, NoopNotificationService, NoopPrefsStore, NotificationFuture,
    NotificationService, PrefsStore, PrefsStoreFuture,
};

use crate::{WebAlertService, WebPrefsStore};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Adapter enum that erases the concrete preferences backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser-backed preference storage.
    Browser(WebPrefsStore),
    /// No-op fallback used for headless builds.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Headless(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Headless(store) => store.save_pref(key, raw_json),
        }
    }
}

/// Adapter enum that erases the concrete notification backend behind [`NotificationService`].
#[derive(Debug, Clone, Copy)]
pub enum NotificationServiceAdapter {
    /// Blocking browser dialogs.
    Browser(WebAlertService),
    /// Silently dropped notices for headless builds.
    Headless(NoopNotificationService),
}

impl NotificationService for NotificationServiceAdapter {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(service) => service.notify(title, body),
            Self::Headless(service) => service.notify(title, body),
        }
    }
}

/// Builds the preferences adapter for the compile-time selected host strategy.
///
/// `namespace` prefixes every physical storage key in the browser strategy.
pub fn prefs_store(namespace: Option<&'static str>) -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(match namespace {
            Some(namespace) => WebPrefsStore::namespaced(namespace),
            None => WebPrefsStore::new(),
        }),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Builds the notification adapter for the compile-time selected host strategy.
pub fn notification_service() -> NotificationServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NotificationServiceAdapter::Browser(WebAlertService),
        HostStrategy::Headless => NotificationServiceAdapter::Headless(NoopNotificationService),
    }
}

/// Assembles the host bundle injected into slot engines for the selected strategy.
pub fn build_host_services(namespace: Option<&'static str>) -> HostServices {
    HostServices::new(
        Rc::new(prefs_store(namespace)),
        Rc::new(notification_service()),
        selected_host_strategy(),
    )
}
