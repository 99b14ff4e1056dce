//! Notification service contracts and headless adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for user-visible notifications (alerts, toasts, blocking dialogs).
pub trait NotificationService {
    /// Dispatches a notification message.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// Message body.
    pub body: String,
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every notice in memory.
pub struct MemoryNotificationService {
    inner: Rc<RefCell<Vec<Notice>>>,
}

impl MemoryNotificationService {
    /// Returns all notices delivered so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.inner.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().push(Notice {
                title: title.to_string(),
                body: body.to_string(),
            });
            Ok(())
        })
    }
}
