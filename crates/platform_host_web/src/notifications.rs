//! Notification host-service adapters for browser contexts.

use platform_host::{NotificationFuture, NotificationService};

fn render_message(title: &str, body: &str) -> String {
    if body.trim().is_empty() {
        title.to_string()
    } else {
        format!("{title}: {body}")
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Blocking dialog adapter backed by `window.alert`.
///
/// Used for failures the user must acknowledge before continuing, such as adding to a full grid.
pub struct WebAlertService;

impl NotificationService for WebAlertService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let rendered = render_message(title, body);

            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                return window
                    .alert_with_message(&rendered)
                    .map_err(|err| format!("alert dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = rendered;
                Ok(())
            }
        })
    }
}
