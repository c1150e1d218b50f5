//! Notification sink - transient user-facing messages.
//!
//! Every failure or success that the user should see goes through one
//! `NotificationSink` call: fire-and-forget, non-blocking, auto-dismissed
//! after [`DISPLAY_DURATION_MS`]. The most recent notification replaces
//! whatever is displayed; there is no queue.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{info, warn};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// How long a notification stays on screen.
pub const DISPLAY_DURATION_MS: u64 = 3200;

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Notification {
    /// Unique id, used by displays to replace the visible toast
    pub id: String,
    /// Category
    pub kind: NotificationKind,
    /// Headline
    pub title: String,
    /// Optional second line
    pub detail: Option<String>,
}

impl Notification {
    /// Create a notification.
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            detail: None,
        }
    }

    /// A success message.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    /// An error message.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    /// An informational message.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    /// Attach a second line.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Where notifications go. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Fire-and-forget.
    fn notify(&self, notification: Notification);
}

/// Sink that forwards notifications to `tracing`.
///
/// The default for headless use; a real frontend replaces this with its
/// toast display.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => warn!(
                title = %notification.title,
                detail = ?notification.detail,
                "notification"
            ),
            NotificationKind::Success | NotificationKind::Info => info!(
                title = %notification.title,
                detail = ?notification.detail,
                "notification"
            ),
        }
    }
}

/// Sink that records every notification. The test double.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Notification>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.entries.lock().expect("sink poisoned").clone()
    }

    /// The notification currently displayed (most recent replaces).
    pub fn latest(&self) -> Option<Notification> {
        self.entries.lock().expect("sink poisoned").last().cloned()
    }

    /// Count of recorded notifications of one kind.
    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.entries
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.lock().expect("sink poisoned").clear();
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .expect("sink poisoned")
            .push(notification);
    }
}
