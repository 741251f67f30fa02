//! Success/error notifications.
//!
//! Every toast also lands in the session's activity log, which keeps the full
//! history after the toast itself has been dismissed.

use dioxus::prelude::*;

use crate::icons::{FaBell, FaXmark};
use crate::Icon;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// Toasts dismiss themselves after this long.
#[cfg(target_arch = "wasm32")]
const TOAST_LIFETIME_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub title: String,
    pub description: Option<String>,
    pub timestamp: String,
    pub dismissed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
    pub log_visible: bool,
}

impl Toasts {
    pub fn push(
        &mut self,
        level: ToastLevel,
        title: &str,
        description: Option<&str>,
        timestamp: String,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            title: title.to_string(),
            description: description.map(str::to_string),
            timestamp,
            dismissed: false,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        if let Some(toast) = self.entries.iter_mut().find(|t| t.id == id) {
            toast.dismissed = true;
        }
    }

    /// Undismissed toasts, newest first.
    pub fn active(&self) -> Vec<Toast> {
        self.entries
            .iter()
            .rev()
            .filter(|t| !t.dismissed)
            .cloned()
            .collect()
    }

    /// Everything shown this session, newest first.
    pub fn history(&self) -> Vec<Toast> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|t| t.level == ToastLevel::Error)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

pub fn toast_success(toasts: &mut Signal<Toasts>, title: &str, description: Option<&str>) {
    notify(toasts, ToastLevel::Success, title, description);
}

pub fn toast_error(toasts: &mut Signal<Toasts>, title: &str, description: &str) {
    tracing::warn!("{title}: {description}");
    notify(toasts, ToastLevel::Error, title, Some(description));
}

pub fn notify(
    toasts: &mut Signal<Toasts>,
    level: ToastLevel,
    title: &str,
    description: Option<&str>,
) {
    let id = toasts
        .write()
        .push(level, title, description, current_time());

    #[cfg(target_arch = "wasm32")]
    {
        let mut toasts = *toasts;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            toasts.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

/// Provides the toast context and renders the toast stack above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Toasts::default()));

    rsx! {
        document::Stylesheet { href: TOAST_CSS }
        {children}
        ToastStack {}
        ActivityLogPanel {}
    }
}

#[component]
fn ToastStack() -> Element {
    let mut toasts = use_toasts();
    let active = toasts().active();

    rsx! {
        div { class: "toast-stack",
            for toast in active {
                div {
                    key: "{toast.id}",
                    class: "toast {toast.level.class()}",
                    div { class: "toast-body",
                        strong { "{toast.title}" }
                        if let Some(description) = &toast.description {
                            p { "{description}" }
                        }
                    }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: move |_| toasts.write().dismiss(toast.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut toasts = use_toasts();

    if !toasts().log_visible {
        return rsx! {};
    }

    let entries = toasts().history();

    rsx! {
        div { class: "activity-log-panel",
            div { class: "activity-log-header",
                span { "Activity" }
                div { class: "activity-log-header-actions",
                    button { onclick: move |_| toasts.write().clear(), "Clear" }
                    button { onclick: move |_| toasts.write().log_visible = false, "Close" }
                }
            }
            div { class: "activity-log-entries",
                if entries.is_empty() {
                    div { class: "activity-log-entry info", "Nothing yet" }
                }
                for entry in entries {
                    div {
                        key: "{entry.id}",
                        class: "activity-log-entry {entry.level.class()}",
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.title}" }
                        if let Some(description) = &entry.description {
                            span { class: "view-muted", " {description}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let mut toasts = use_toasts();
    let count = toasts().history().len();
    let has_errors = toasts().has_errors();

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity",
            onclick: move |_| {
                let visible = toasts().log_visible;
                toasts.write().log_visible = !visible;
            },
            Icon { icon: FaBell, width: 14, height: 14 }
            if count > 0 {
                span { class: "activity-log-count", "{count}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_is_newest_first() {
        let mut toasts = Toasts::default();
        toasts.push(ToastLevel::Success, "Saved", None, "10:00:00".into());
        let second = toasts.push(ToastLevel::Error, "Error", Some("boom"), "10:00:01".into());
        let active = toasts.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, second);
        assert_eq!(active[0].description.as_deref(), Some("boom"));
        assert!(toasts.has_errors());
    }

    #[test]
    fn test_dismiss_keeps_history() {
        let mut toasts = Toasts::default();
        let id = toasts.push(ToastLevel::Info, "Hello", None, String::new());
        toasts.dismiss(id);
        toasts.dismiss(999);
        assert!(toasts.active().is_empty());
        assert_eq!(toasts.history().len(), 1);

        toasts.clear();
        assert!(toasts.history().is_empty());
        assert!(!toasts.has_errors());
    }
}
