//! User-facing notification queue.
//!
//! Short-lived status messages (refresh failures, maintenance confirmations)
//! shown in the TUI status line. The queue is bounded and entries expire
//! after a fixed TTL so stale noise never accumulates.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::Duration;

/// Maximum notifications retained; older entries are dropped first.
const MAX_NOTIFICATIONS: usize = 8;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

/// One transient status message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    fn new(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Local::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Local>) -> bool {
        (now - self.created_at)
            .to_std()
            .map_or(false, |age| age > NOTIFICATION_TTL)
    }
}

/// Bounded FIFO of notifications, newest at the back.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotifyLevel::Info, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotifyLevel::Warning, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotifyLevel::Error, message));
    }

    fn push(&mut self, notification: Notification) {
        if self.entries.len() >= MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    /// The most recent notification, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Drop entries older than [`NOTIFICATION_TTL`].
    pub fn prune(&mut self) {
        let now = Local::now();
        self.entries.retain(|n| !n.is_expired(now));
    }

    /// Clear everything (user pressed dismiss).
    pub fn dismiss_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_latest() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.info("synced");
        queue.error("refresh failed");

        assert_eq!(queue.len(), 2);
        let latest = queue.latest().unwrap();
        assert_eq!(latest.level, NotifyLevel::Error);
        assert_eq!(latest.message, "refresh failed");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = NotificationQueue::new();
        for i in 0..12 {
            queue.info(format!("message {i}"));
        }
        assert_eq!(queue.len(), MAX_NOTIFICATIONS);
        assert_eq!(queue.iter().next().unwrap().message, "message 4");
        assert_eq!(queue.latest().unwrap().message, "message 11");
    }

    #[test]
    fn test_prune_keeps_fresh_entries() {
        let mut queue = NotificationQueue::new();
        queue.info("fresh");
        queue.prune();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_prune_drops_expired_entries() {
        let mut queue = NotificationQueue::new();
        queue.info("stale");
        // Backdate past the TTL.
        if let Some(entry) = queue.entries.front_mut() {
            entry.created_at = Local::now() - chrono::Duration::seconds(30);
        }
        queue.prune();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_all() {
        let mut queue = NotificationQueue::new();
        queue.info("one");
        queue.warning("two");
        queue.dismiss_all();
        assert!(queue.is_empty());
        assert!(queue.latest().is_none());
    }
}
