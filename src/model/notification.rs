use std::time::{Duration, Instant};

use egui::Color32;
use uuid::Uuid;

/// Default lifetime of a toast before it dismisses itself.
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        use egui_phosphor::regular as ph;
        match self {
            Severity::Info => ph::INFO,
            Severity::Success => ph::CHECK_CIRCLE,
            Severity::Error => ph::X_CIRCLE,
        }
    }

    pub fn border_color(self) -> Color32 {
        match self {
            Severity::Info => Color32::from_rgb(59, 130, 246),
            Severity::Success => Color32::from_rgb(34, 197, 94),
            Severity::Error => Color32::from_rgb(239, 68, 68),
        }
    }
}

/// A transient message shown in the toast stack.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Instant,
    message: String,
    severity: Severity,
}

/// Queue of visible toasts plus toasts waiting for their show time.
///
/// Expiry and manual dismissal may hit the same toast in either order;
/// whichever comes second finds nothing and does nothing.
#[derive(Debug)]
pub struct NotificationCenter {
    visible: Vec<Notification>,
    scheduled: Vec<Scheduled>,
    lifetime: Duration,
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            visible: Vec::new(),
            scheduled: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            expires_at: now + self.lifetime,
        };
        let id = notification.id;
        self.visible.push(notification);
        id
    }

    /// Queue a toast that becomes visible at `due`.
    pub fn schedule(&mut self, message: impl Into<String>, severity: Severity, due: Instant) {
        self.scheduled.push(Scheduled {
            due,
            message: message.into(),
            severity,
        });
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.visible.len();
        self.visible.retain(|n| n.id != id);
        self.visible.len() != before
    }

    /// Promote due scheduled toasts and drop expired ones.
    pub fn tick(&mut self, now: Instant) {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|s| s.due <= now);
        self.scheduled = pending;
        for entry in due {
            // The lifetime counts from when the toast was due to appear.
            let expires_at = entry.due + self.lifetime;
            self.visible.push(Notification {
                id: Uuid::new_v4(),
                message: entry.message,
                severity: entry.severity,
                expires_at,
            });
        }
        self.visible.retain(|n| n.expires_at > now);
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    /// Earliest instant at which `tick` would change something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.visible
            .iter()
            .map(|n| n.expires_at)
            .chain(self.scheduled.iter().map(|s| s.due))
            .min()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_LIFETIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_lifetime() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        center.push("hello", Severity::Info, start);

        center.tick(start + Duration::from_millis(4999));
        assert_eq!(center.visible().len(), 1);

        center.tick(start + Duration::from_millis(5000));
        assert!(center.visible().is_empty());
    }

    #[test]
    fn test_dismiss_after_expiry_is_noop() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        let id = center.push("bye", Severity::Error, start);

        center.tick(start + Duration::from_secs(6));
        assert!(!center.dismiss(id));
        assert!(center.visible().is_empty());
    }

    #[test]
    fn test_manual_dismiss_then_expiry() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        let keep = center.push("keep", Severity::Info, start);
        let gone = center.push("gone", Severity::Success, start);

        assert!(center.dismiss(gone));
        assert!(!center.dismiss(gone));
        center.tick(start + Duration::from_secs(1));
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].id, keep);
    }

    #[test]
    fn test_scheduled_toast_appears_when_due() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        center.schedule("later", Severity::Success, start + Duration::from_secs(1));

        center.tick(start + Duration::from_millis(500));
        assert!(center.visible().is_empty());
        assert_eq!(center.next_deadline(), Some(start + Duration::from_secs(1)));

        center.tick(start + Duration::from_secs(1));
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].message, "later");
        assert_eq!(
            center.next_deadline(),
            Some(start + Duration::from_secs(1) + DEFAULT_TOAST_LIFETIME)
        );
    }

    #[test]
    fn test_severity_styles_are_distinct() {
        assert_ne!(Severity::Info.icon(), Severity::Error.icon());
        assert_ne!(Severity::Success.border_color(), Severity::Error.border_color());
    }
}
