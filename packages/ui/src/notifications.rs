//! Dismissible messages shown when an operation fails (or succeeds).

use dioxus::prelude::*;

const NOTIFICATIONS_CSS: Asset = asset!("/assets/notifications.css");

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    fn class(self) -> &'static str {
        match self {
            NotificationLevel::Error => "notification error",
            NotificationLevel::Warning => "notification warning",
            NotificationLevel::Success => "notification success",
            NotificationLevel::Info => "notification info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub timestamp: String,
    pub level: NotificationLevel,
    pub message: String,
}

/// Messages currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    next_id: u64,
    pub entries: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, level: NotificationLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Notification {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|n| n.level == NotificationLevel::Error)
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

pub fn notify(log: &mut Signal<Notifications>, level: NotificationLevel, message: &str) {
    match level {
        NotificationLevel::Error => tracing::error!("{message}"),
        NotificationLevel::Warning => tracing::warn!("{message}"),
        _ => tracing::info!("{message}"),
    }
    log.write().push(level, message);
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

#[component]
pub fn NotificationPanel() -> Element {
    let mut log = use_notifications();
    let entries = log.read().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTIFICATIONS_CSS }

        div {
            class: "notification-panel",
            role: "status",
            for entry in entries.iter().rev() {
                div {
                    key: "{entry.id}",
                    class: entry.level.class(),
                    span { class: "notification-time", "{entry.timestamp}" }
                    span { class: "notification-message", " {entry.message}" }
                    button {
                        class: "notification-dismiss",
                        title: "Dismiss",
                        onclick: {
                            let id = entry.id;
                            move |_| log.write().dismiss(id)
                        },
                        "×"
                    }
                }
            }
            if entries.len() > 1 {
                button {
                    class: "notification-clear",
                    onclick: move |_| log.write().clear(),
                    "Dismiss all"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut log = Notifications::default();
        let a = log.push(NotificationLevel::Error, "Error adding recipe");
        let b = log.push(NotificationLevel::Success, "Recipe added successfully!");
        assert!(b > a);
        assert_eq!(log.entries.len(), 2);
        assert!(log.has_errors());
    }

    #[test]
    fn test_dismiss_removes_only_that_entry() {
        let mut log = Notifications::default();
        let a = log.push(NotificationLevel::Error, "first");
        log.push(NotificationLevel::Warning, "second");
        log.dismiss(a);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].message, "second");
        assert!(!log.has_errors());

        // Dismissing an unknown id is a no-op.
        log.dismiss(a);
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut log = Notifications::default();
        log.push(NotificationLevel::Info, "one");
        log.push(NotificationLevel::Info, "two");
        log.clear();
        assert!(log.entries.is_empty());
    }
}
