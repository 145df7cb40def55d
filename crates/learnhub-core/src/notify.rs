//! User-facing notifications
//!
//! Transient messages raised at the action boundary. The UI drains them
//! into toasts.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Info => "toast info",
            Level::Success => "toast success",
            Level::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
}

/// Queue of visible notifications, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    next_id: u64,
    items: VecDeque<Notification>,
}

impl Notices {
    /// Older entries are dropped beyond this
    const MAX_VISIBLE: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification and return its id
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push_back(Notification {
            id: self.next_id,
            level,
            message: message.into(),
        });
        while self.items.len() > Self::MAX_VISIBLE {
            self.items.pop_front();
        }
        self.next_id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Ids of visible notifications pushed after `id`, oldest first
    pub fn pushed_after(&self, id: u64) -> impl Iterator<Item = u64> + '_ {
        self.items.iter().map(|n| n.id).filter(move |&n| n > id)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notices = Notices::new();
        let a = notices.info("a");
        let b = notices.error("b");
        assert_ne!(a, b);
        assert_eq!(notices.latest().map(|n| n.level), Some(Level::Error));
        notices.dismiss(a);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().map(|n| n.message.as_str()), Some("b"));
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut notices = Notices::new();
        for i in 0..8 {
            notices.info(format!("n{}", i));
        }
        assert_eq!(notices.len(), 5);
        assert_eq!(notices.iter().next().map(|n| n.message.as_str()), Some("n3"));
    }

    #[test]
    fn test_pushed_after_ignores_dismissals() {
        let mut notices = Notices::new();
        let a = notices.info("a");
        let b = notices.success("b");
        let c = notices.error("c");
        assert_eq!(notices.pushed_after(0).collect::<Vec<_>>(), vec![a, b, c]);

        notices.dismiss(c);
        assert_eq!(notices.pushed_after(c).count(), 0);
        assert_eq!(notices.pushed_after(a).collect::<Vec<_>>(), vec![b]);
    }
}
