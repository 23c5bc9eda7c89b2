//! User-facing outcome notices.

use mockall::automock;
use tracing::{info, warn};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The action completed.
    Success,
    /// The action failed but the session can continue.
    Error,
}

/// A transient, non-blocking message for the storefront user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices.
///
/// Implementations must not block and must not fail the caller; a notice is
/// advisory, never part of an operation's outcome.
#[automock]
pub trait Notifier: Send + Sync {
    /// Deliver a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Notifier that emits notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "cart notice"),
            NoticeLevel::Error => warn!(message = %notice.message, "cart notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_the_level() {
        assert_eq!(Notice::success("saved").level, NoticeLevel::Success);
        assert_eq!(Notice::error("failed").level, NoticeLevel::Error);
    }
}
