//! Transient notifications.
//!
//! One toast at a time. A newer notification replaces the current one, and
//! each toast expires a fixed time after it was shown.

use ratatui::style::Color;
use std::time::{Duration, Instant};

/// Default time a toast stays on screen.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn color(self) -> Color {
        match self {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Info => Color::Blue,
            Severity::Warning => Color::Yellow,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Error => "✖",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Show a notification now.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    /// Show a notification as of `now`, replacing whatever is displayed.
    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::error!(%message, "notification"),
            Severity::Warning => tracing::warn!(%message, "notification"),
            Severity::Success | Severity::Info => tracing::info!(%message, "notification"),
        }
        self.current = Some(Notification {
            message,
            severity,
            expires_at: now + self.ttl,
        });
    }

    /// Drop the current toast once its own deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut notifier = Notifier::default();
        let t0 = Instant::now();
        notifier.notify_at("Link created", Severity::Success, t0);
        notifier.tick(t0 + Duration::from_millis(2_999));
        assert_eq!(notifier.current().unwrap().message, "Link created");
        notifier.tick(t0 + Duration::from_secs(3));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_newer_notification_replaces_and_reschedules() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        let t0 = Instant::now();
        notifier.notify_at("first", Severity::Info, t0);
        notifier.notify_at("second", Severity::Error, t0 + Duration::from_secs(2));

        notifier.tick(t0 + Duration::from_secs(4));
        let shown = notifier.current().unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.severity, Severity::Error);

        notifier.tick(t0 + Duration::from_secs(5));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_severity_colors_differ() {
        let colors = [
            Severity::Success.color(),
            Severity::Error.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
