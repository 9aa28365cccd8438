//! Passive user-facing notifications.
//!
//! Only one notification is visible at a time: a new one replaces whatever
//! was showing. The loading notification stays until it is dismissed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Updating data...";
pub const SUCCESS_MESSAGE: &str = "Data updated automatically!";
pub const UNCHANGED_MESSAGE: &str = "Data is already up to date";
pub const FAILURE_MESSAGE: &str = "Failed to update data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Loading,
    Success,
    Info,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Loading => "🔄",
            Self::Success => "✅",
            Self::Info => "ℹ️",
            Self::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);

    /// Hide the visible notification if it is of `kind`.
    fn dismiss(&self, kind: NotificationKind);
}

/// Reports notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let icon = kind.icon();
        match kind {
            NotificationKind::Error => tracing::error!(?kind, "{icon} {message}"),
            NotificationKind::Loading => tracing::debug!(?kind, "{icon} {message}"),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(?kind, "{icon} {message}");
            }
        }
    }

    fn dismiss(&self, kind: NotificationKind) {
        tracing::trace!(?kind, "notification dismissed");
    }
}

/// Keeps every notification and tracks which one is visible.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    history: Mutex<Vec<Notification>>,
    visible: Mutex<Option<Notification>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Notification> {
        lock(&self.history).clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<NotificationKind> {
        lock(&self.history).iter().map(|n| n.kind).collect()
    }

    #[must_use]
    pub fn visible(&self) -> Option<Notification> {
        lock(&self.visible).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let notification = Notification {
            kind,
            message: message.to_string(),
        };
        lock(&self.history).push(notification.clone());
        *lock(&self.visible) = Some(notification);
    }

    fn dismiss(&self, kind: NotificationKind) {
        let mut visible = lock(&self.visible);
        if visible.as_ref().is_some_and(|n| n.kind == kind) {
            *visible = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn newer_notification_replaces_visible_one() {
        let notifier = RecordingNotifier::new();
        notifier.notify(NotificationKind::Loading, LOADING_MESSAGE);
        notifier.notify(NotificationKind::Info, UNCHANGED_MESSAGE);

        assert_eq!(
            notifier.visible().map(|n| n.kind),
            Some(NotificationKind::Info)
        );
        assert_eq!(
            notifier.kinds(),
            vec![NotificationKind::Loading, NotificationKind::Info]
        );
    }

    #[test]
    fn dismiss_only_hides_matching_kind() {
        let notifier = RecordingNotifier::new();
        notifier.notify(NotificationKind::Error, FAILURE_MESSAGE);
        notifier.dismiss(NotificationKind::Loading);
        assert!(notifier.visible().is_some());

        notifier.dismiss(NotificationKind::Error);
        assert!(notifier.visible().is_none());
    }
}
