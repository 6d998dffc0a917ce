//! Transient notifications and the modal error queue

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Oldest notifications are dropped beyond this
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A short-lived message shown in the status area
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub detail: Option<String>,
    created: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= NOTIFICATION_TTL
    }
}

/// Notification list plus errors that need acknowledgement
#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    errors: VecDeque<String>,
}

impl Notifications {
    pub fn push(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        detail: Option<String>,
    ) {
        self.push_at(level, title, detail, Instant::now());
    }

    fn push_at(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        detail: Option<String>,
        created: Instant,
    ) {
        if self.items.len() == MAX_VISIBLE {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            level,
            title: title.into(),
            detail,
            created,
        });
    }

    pub fn success(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(NotificationLevel::Success, title, Some(detail.into()));
    }

    pub fn info(&mut self, title: impl Into<String>) {
        self.push(NotificationLevel::Info, title, None);
    }

    pub fn error(&mut self, title: impl Into<String>, detail: Option<String>) {
        self.push(NotificationLevel::Error, title, detail);
    }

    /// Drop notifications older than the TTL
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    /// Queue an error for the modal dialog
    pub fn push_error_dialog(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Errors waiting behind the one currently shown
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_ttl() {
        let mut notes = Notifications::default();
        let start = Instant::now();
        notes.push_at(NotificationLevel::Info, "old", None, start);
        notes.push_at(NotificationLevel::Info, "new", None, start + Duration::from_secs(3));

        notes.expire(start + Duration::from_secs(4));
        assert_eq!(notes.iter().count(), 2);

        notes.expire(start + NOTIFICATION_TTL);
        assert_eq!(notes.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(), vec!["new"]);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut notes = Notifications::default();
        for i in 0..5 {
            notes.info(format!("n{}", i));
        }
        let titles: Vec<_> = notes.iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["n2", "n3", "n4"]);
        assert_eq!(notes.latest().map(|n| n.title.as_str()), Some("n4"));
    }

    #[test]
    fn test_success_carries_detail() {
        let mut notes = Notifications::default();
        notes.success("Product created successfully!", "Lamp has been added to your products.");
        let latest = notes.latest().unwrap();
        assert_eq!(latest.level, NotificationLevel::Success);
        assert_eq!(latest.detail.as_deref(), Some("Lamp has been added to your products."));
    }

    #[test]
    fn test_error_dialog_queue_is_fifo() {
        let mut notes = Notifications::default();
        assert!(!notes.has_errors());
        notes.push_error_dialog("first");
        notes.push_error_dialog("second");
        assert_eq!(notes.current_error(), Some("first"));
        assert_eq!(notes.queued_errors(), 1);
        notes.dismiss_error();
        assert_eq!(notes.current_error(), Some("second"));
        assert_eq!(notes.queued_errors(), 0);
        notes.dismiss_error();
        assert!(!notes.has_errors());
    }
}
