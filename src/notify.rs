//! Toast notifications.
//!
//! The [`NotificationCenter`] keeps an insertion-ordered list of active toasts.
//! Each toast removes itself once its duration has elapsed on the injected
//! clock; explicit removal is idempotent.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::clock::Clock;
use crate::types::Severity;

/// Lifetime of a toast when the caller does not pick one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// One user-facing toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

/// Lifecycle events for subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    Pushed(Notification),
    Removed(String),
}

/// Application-wide toast queue.
#[derive(Clone)]
pub struct NotificationCenter {
    active: Arc<Mutex<Vec<Notification>>>,
    events: broadcast::Sender<NotificationEvent>,
    clock: Arc<dyn Clock>,
    default_duration: Duration,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_default_duration(clock, DEFAULT_DURATION)
    }

    /// Creates a center whose toasts live `default_duration` unless told
    /// otherwise.
    pub fn with_default_duration(clock: Arc<dyn Clock>, default_duration: Duration) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            events,
            clock,
            default_duration,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Pushes a toast with the default duration.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> String {
        self.push(message, severity, None)
    }

    /// Appends a toast and schedules its removal after `duration`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&self, message: impl Into<String>, severity: Severity, duration: Option<Duration>) -> String {
        let notification = Notification {
            id: Uuid::new_v4().simple().to_string(),
            message: message.into(),
            severity,
            duration: duration.unwrap_or(self.default_duration),
        };
        let id = notification.id.clone();
        log::info!("toast [{}] {}", notification.severity, notification.message);

        self.active.lock().push(notification.clone());
        let _ = self.events.send(NotificationEvent::Pushed(notification.clone()));

        let center = self.clone();
        let expiring = id.clone();
        tokio::spawn(async move {
            center.clock.sleep(notification.duration).await;
            center.remove(&expiring);
        });
        id
    }

    /// Removes the toast with `id`. Removing an unknown id does nothing.
    pub fn remove(&self, id: &str) {
        let removed = {
            let mut active = self.active.lock();
            let before = active.len();
            active.retain(|n| n.id != id);
            active.len() != before
        };
        if removed {
            let _ = self.events.send(NotificationEvent::Removed(id.to_string()));
        }
    }

    /// Active toasts in insertion order.
    pub fn active(&self) -> Vec<Notification> {
        self.active.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::HeadlessClock;

    fn center() -> NotificationCenter {
        NotificationCenter::new(Arc::new(HeadlessClock))
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_duration() {
        let center = center();
        let id = center.push("done", Severity::Success, Some(Duration::from_millis(1000)));
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(center.active().iter().all(|n| n.id != id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_duration_is_five_seconds() {
        let center = center();
        center.notify("hello", Severity::Info);
        assert_eq!(center.active()[0].duration, DEFAULT_DURATION);
        tokio::time::sleep(Duration::from_millis(5001)).await;
        tokio::task::yield_now().await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_is_idempotent_and_ordered() {
        let center = center();
        let a = center.notify("a", Severity::Info);
        let b = center.notify("b", Severity::Warning);
        let c = center.notify("c", Severity::Error);
        center.remove(&b);
        center.remove(&b);
        let ids: Vec<String> = center.active().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_are_broadcast() {
        let center = center();
        let mut rx = center.subscribe();
        let id = center.notify("x", Severity::Info);
        center.remove(&id);
        assert!(matches!(rx.recv().await.unwrap(), NotificationEvent::Pushed(n) if n.id == id));
        assert_eq!(rx.recv().await.unwrap(), NotificationEvent::Removed(id));
    }
}
